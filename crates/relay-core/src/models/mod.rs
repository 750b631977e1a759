//! Domain models for one relay invocation.

pub mod media;
pub mod reply;
pub mod upload;

pub use media::{MediaKind, MediaNotification, MimeCategory, Sender, StagedKind};
pub use reply::Reply;
pub use upload::{CaptureMetadata, TimestampSource, UploadResult};
