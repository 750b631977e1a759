//! Relay Core Library
//!
//! This crate provides the domain models, error taxonomy, configuration and
//! seam traits shared by every component of the Telegram to Immich relay.

pub mod access;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types
pub use access::AllowList;
pub use config::{Config, ConfigError, Settings};
pub use error::{IngestError, LogLevel};
pub use models::{
    CaptureMetadata, MediaKind, MediaNotification, MimeCategory, Reply, Sender, StagedKind,
    TimestampSource, UploadResult,
};
pub use traits::{AssetStore, AssetUpload, MediaFetcher, StoreResponse};
