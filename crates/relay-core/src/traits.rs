//! Seam traits
//!
//! The pipeline talks to the chat transport and to the storage service only
//! through these traits. The bot crate implements `MediaFetcher` on top of
//! the Telegram API and the client crate implements `AssetStore` against
//! Immich; tests substitute in-memory versions.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::models::CaptureMetadata;

/// Downloads a remote payload identified by a transport file handle.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Write the payload behind `remote_handle` to `destination`.
    async fn fetch(&self, remote_handle: &str, destination: &Path) -> anyhow::Result<()>;
}

/// Everything needed to create one asset.
#[derive(Debug, Clone)]
pub struct AssetUpload {
    pub path: PathBuf,
    /// Local filename, sent as `deviceAssetId` and as the part filename.
    pub device_asset_id: String,
    pub size_bytes: u64,
    /// Lowercase hex SHA-1 of the file contents.
    pub checksum: String,
    pub metadata: CaptureMetadata,
}

/// Raw HTTP answer from the storage service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreResponse {
    pub status: u16,
    pub body: String,
}

impl StoreResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Storage service operations used by the upload protocol.
///
/// Errors are transport failures only; HTTP status handling is left to the
/// caller.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// `POST /assets`
    async fn create_asset(&self, upload: &AssetUpload) -> anyhow::Result<StoreResponse>;

    /// `PUT /assets/{id}` with a new `dateTimeOriginal`.
    async fn set_date_time_original(
        &self,
        asset_id: &str,
        date_time_original: &str,
    ) -> anyhow::Result<StoreResponse>;
}
