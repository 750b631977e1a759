//! Endpoint methods for the Immich client.

use async_trait::async_trait;
use relay_core::constants::DEVICE_ID;
use relay_core::{AssetStore, AssetUpload, StoreResponse};
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use serde::Deserialize;
use tokio_util::io::ReaderStream;

use crate::{ClientError, ImmichClient, Result};

/// Subset of `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl UserInfo {
    /// Banner line, e.g. `👤 Alice [Admin]`.
    pub fn display_label(&self) -> String {
        let name = self.name.as_deref().unwrap_or("Unknown");
        if self.is_admin {
            format!("👤 {} [Admin]", name)
        } else {
            format!("👤 {}", name)
        }
    }
}

/// Subset of `GET /albums/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumInfo {
    pub album_name: String,
}

async fn into_store_response(response: reqwest::Response) -> Result<StoreResponse> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok(StoreResponse { status, body })
}

async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ClientError::Status { status, body })
}

impl ImmichClient {
    /// `GET /server/ping`, returning the raw HTTP status.
    pub async fn ping(&self) -> Result<u16> {
        let request = self
            .client
            .get(self.build_url("/server/ping"))
            .timeout(Self::status_timeout());
        let response = self.apply_auth(request).send().await?;
        Ok(response.status().as_u16())
    }

    /// `GET /users/me`
    pub async fn current_user(&self) -> Result<UserInfo> {
        let request = self
            .client
            .get(self.build_url("/users/me"))
            .timeout(Self::status_timeout());
        let response = error_for_status(self.apply_auth(request).send().await?).await?;
        Ok(response.json().await?)
    }

    /// `GET /albums/{id}` without the asset list.
    pub async fn album(&self, album_id: &str) -> Result<AlbumInfo> {
        let request = self
            .client
            .get(self.build_url(&format!("/albums/{}", album_id)))
            .query(&[("withoutAssets", "true")])
            .timeout(Self::status_timeout());
        let response = error_for_status(self.apply_auth(request).send().await?).await?;
        Ok(response.json().await?)
    }

    /// `POST /assets` with the file streamed from disk.
    pub async fn upload_asset(&self, upload: &AssetUpload) -> Result<StoreResponse> {
        let file = tokio::fs::File::open(&upload.path).await?;
        let stream = ReaderStream::new(file);
        let asset_data = Part::stream_with_length(Body::wrap_stream(stream), upload.size_bytes)
            .file_name(upload.device_asset_id.clone());

        let form = Form::new()
            .text("deviceAssetId", upload.device_asset_id.clone())
            .text("deviceId", DEVICE_ID)
            .text("fileCreatedAt", upload.metadata.file_created_at.clone())
            .text("fileModifiedAt", upload.metadata.file_modified_at.clone())
            .text("isFavorite", "false")
            .text("visibility", "timeline")
            .part("assetData", asset_data);

        let request = self
            .client
            .post(self.build_url("/assets"))
            .header("x-immich-checksum", upload.checksum.as_str())
            .multipart(form);
        let response = self.apply_auth(request).send().await?;
        tracing::debug!(
            device_asset_id = %upload.device_asset_id,
            status = response.status().as_u16(),
            "Asset upload answered"
        );
        into_store_response(response).await
    }

    /// `PUT /assets/{id}` setting `dateTimeOriginal`.
    pub async fn update_date_time_original(
        &self,
        asset_id: &str,
        date_time_original: &str,
    ) -> Result<StoreResponse> {
        let request = self
            .client
            .put(self.build_url(&format!("/assets/{}", asset_id)))
            .json(&serde_json::json!({ "dateTimeOriginal": date_time_original }));
        let response = self.apply_auth(request).send().await?;
        tracing::debug!(
            asset_id = %asset_id,
            status = response.status().as_u16(),
            "Asset update answered"
        );
        into_store_response(response).await
    }
}

#[async_trait]
impl AssetStore for ImmichClient {
    async fn create_asset(&self, upload: &AssetUpload) -> anyhow::Result<StoreResponse> {
        Ok(self.upload_asset(upload).await?)
    }

    async fn set_date_time_original(
        &self,
        asset_id: &str,
        date_time_original: &str,
    ) -> anyhow::Result<StoreResponse> {
        Ok(self
            .update_date_time_original(asset_id, date_time_original)
            .await?)
    }
}
