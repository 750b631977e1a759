//! Relay pipeline: authorize → dispatch → stage → checksum + metadata → upload.

use relay_core::models::{MediaNotification, Reply, UploadResult};
use relay_core::{AssetStore, AssetUpload, Config, IngestError, LogLevel, MediaFetcher};

use super::orchestrator::upload_asset;
use crate::checksum::sha1_hex;
use crate::dispatch::dispatch;
use crate::metadata::capture_metadata;
use crate::staging::stage;

/// Collaborators of one relay invocation.
#[derive(Clone, Copy)]
pub struct RelayContext<'a> {
    pub config: &'a Config,
    pub fetcher: &'a dyn MediaFetcher,
    pub store: &'a dyn AssetStore,
}

/// Run one notification through the pipeline and produce the single reply
/// for the sender. The staged file is removed before this returns.
pub async fn relay_media(ctx: RelayContext<'_>, notification: &MediaNotification) -> Reply {
    let sender = &notification.sender;
    match ingest(ctx, notification).await {
        Ok(result) => Reply::from(result),
        Err(e) => {
            match e.log_level() {
                LogLevel::Debug => tracing::debug!(
                    sender_id = sender.id,
                    sender = %sender.display_name,
                    error = %e,
                    "Media not relayed"
                ),
                LogLevel::Warn => tracing::warn!(
                    sender_id = sender.id,
                    sender = %sender.display_name,
                    error = %e,
                    "Media not relayed"
                ),
                LogLevel::Error => tracing::error!(
                    sender_id = sender.id,
                    sender = %sender.display_name,
                    error = %e,
                    "Media relay failed"
                ),
            }
            e.reply()
        }
    }
}

async fn ingest(
    ctx: RelayContext<'_>,
    notification: &MediaNotification,
) -> Result<UploadResult, IngestError> {
    let sender = &notification.sender;
    if !ctx.config.allowed_user_ids().is_allowed(sender.id) {
        return Err(IngestError::Unauthorized {
            sender_id: sender.id,
        });
    }

    let media = dispatch(notification)?;
    tracing::info!(
        sender_id = sender.id,
        sender = %sender.display_name,
        kind = notification.kind.label(),
        mime_type = %media.mime_type,
        "Processing asset upload"
    );

    let staged = stage(
        ctx.fetcher,
        ctx.config.staging_dir(),
        &notification.remote_handle,
        &media.file_name,
    )
    .await?;

    let path = staged.path().to_path_buf();
    let timezone = ctx.config.upload_timezone();
    let (checksum, metadata) = tokio::task::spawn_blocking(move || {
        let checksum = sha1_hex(&path)?;
        Ok::<_, std::io::Error>((checksum, capture_metadata(&path, timezone)))
    })
    .await
    .map_err(|e| IngestError::internal(format!("Checksum task failed: {}", e)))??;

    tracing::debug!(
        file_name = %media.file_name,
        checksum = %checksum,
        captured_at = %metadata.file_created_at,
        source = ?metadata.source,
        "Prepared asset"
    );

    let upload = AssetUpload {
        path: staged.path().to_path_buf(),
        device_asset_id: media.file_name,
        size_bytes: staged.size_bytes(),
        checksum,
        metadata,
    };

    match upload_asset(ctx.store, &upload).await {
        UploadResult::Rejected { status, body } => Err(IngestError::UploadRejected { status, body }),
        UploadResult::Failed(message) => Err(IngestError::internal(message)),
        result => Ok(result),
    }
}
