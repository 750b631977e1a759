//! Idempotent asset upload: create → duplicate check → capture date patch.

use relay_core::models::UploadResult;
use relay_core::{AssetStore, AssetUpload};
use serde::Deserialize;

/// Fields of the `POST /assets` answer the protocol looks at.
#[derive(Debug, Deserialize)]
struct CreateAssetResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// Drive one upload to its terminal outcome. Nothing is retried.
///
/// A 200 answer flagged `duplicate` ends the protocol without touching the
/// existing asset. A newly created asset gets its `dateTimeOriginal` patched
/// to the extracted capture time; a failed patch still counts as uploaded.
pub async fn upload_asset(store: &dyn AssetStore, upload: &AssetUpload) -> UploadResult {
    let device_asset_id = upload.device_asset_id.as_str();
    tracing::info!(
        device_asset_id = %device_asset_id,
        size_bytes = upload.size_bytes,
        "Uploading asset to Immich"
    );

    let response = match store.create_asset(upload).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(
                device_asset_id = %device_asset_id,
                error = %format!("{:#}", e),
                "Asset upload request failed"
            );
            return UploadResult::Failed(format!("{:#}", e));
        }
    };

    if !matches!(response.status, 200 | 201) {
        tracing::error!(
            device_asset_id = %device_asset_id,
            status = response.status,
            body = %response.body,
            "Immich rejected asset upload"
        );
        return UploadResult::Rejected {
            status: response.status,
            body: response.body,
        };
    }

    let created: CreateAssetResponse = match serde_json::from_str(&response.body) {
        Ok(created) => created,
        Err(e) => {
            tracing::error!(
                device_asset_id = %device_asset_id,
                error = %e,
                "Unreadable asset upload response"
            );
            return UploadResult::Failed(format!("Invalid upload response: {}", e));
        }
    };

    if response.status == 200 && created.status.as_deref() == Some("duplicate") {
        tracing::info!(device_asset_id = %device_asset_id, "Asset is a duplicate in Immich");
        return UploadResult::Duplicate;
    }

    let Some(asset_id) = created.id.filter(|id| !id.is_empty()) else {
        tracing::error!(
            device_asset_id = %device_asset_id,
            body = %response.body,
            "Upload response has no asset id"
        );
        return UploadResult::Failed("Upload response did not contain an asset id".to_string());
    };

    let date_time_original = upload.metadata.file_created_at.as_str();
    let date_corrected = match store
        .set_date_time_original(&asset_id, date_time_original)
        .await
    {
        Ok(patch) if patch.is_success() => true,
        Ok(patch) => {
            tracing::warn!(
                asset_id = %asset_id,
                status = patch.status,
                body = %patch.body,
                "Failed to correct capture date"
            );
            false
        }
        Err(e) => {
            tracing::warn!(
                asset_id = %asset_id,
                error = %format!("{:#}", e),
                "Capture date update request failed"
            );
            false
        }
    };

    tracing::info!(
        device_asset_id = %device_asset_id,
        asset_id = %asset_id,
        date_time_original = %date_time_original,
        "Successfully uploaded asset to Immich"
    );
    UploadResult::Uploaded {
        asset_id,
        date_corrected,
    }
}
