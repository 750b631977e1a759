//! Staging of downloaded payloads
//!
//! A `StagedFile` owns its path on disk and removes it when dropped, so the
//! file is gone on every exit path of the pipeline, panics included.

use std::io;
use std::path::{Path, PathBuf};

use relay_core::models::StagedKind;
use relay_core::{IngestError, MediaFetcher};

/// Local copy of one remote payload, deleted on drop.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    size_bytes: u64,
    kind: StagedKind,
}

impl StagedFile {
    fn armed(path: PathBuf) -> Self {
        let kind = StagedKind::from_path(&path);
        Self {
            path,
            size_bytes: 0,
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn kind(&self) -> StagedKind {
        self.kind
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::info!(path = %self.path.display(), "Cleaned up staged file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Staged file already absent")
            }
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove staged file"
            ),
        }
    }
}

/// Download `remote_handle` into `staging_dir/file_name`.
///
/// The returned guard is armed before the transfer starts, so a partial
/// download is removed even when the fetch fails.
pub async fn stage(
    fetcher: &dyn MediaFetcher,
    staging_dir: &Path,
    remote_handle: &str,
    file_name: &str,
) -> Result<StagedFile, IngestError> {
    tokio::fs::create_dir_all(staging_dir).await?;

    let mut staged = StagedFile::armed(staging_dir.join(file_name));
    tracing::info!(
        file_name = %file_name,
        path = %staged.path.display(),
        "Downloading media"
    );

    fetcher
        .fetch(remote_handle, &staged.path)
        .await
        .map_err(|e| IngestError::DownloadFailed(format!("{:#}", e)))?;

    let metadata = match tokio::fs::metadata(&staged.path).await {
        Ok(m) if m.is_file() => m,
        Ok(_) => {
            return Err(IngestError::DownloadFailed(format!(
                "{} is not a regular file",
                staged.path.display()
            )))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(IngestError::DownloadFailed(format!(
                "{} was not created",
                staged.path.display()
            )))
        }
        Err(e) => return Err(e.into()),
    };
    staged.size_bytes = metadata.len();

    Ok(staged)
}
