//! End-to-end relay pipeline against in-memory transport and storage.

use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use futures::FutureExt;
use relay_core::models::{MediaKind, MediaNotification, Reply, Sender};
use relay_core::{AllowList, AssetStore, AssetUpload, Config, MediaFetcher, Settings, StoreResponse};
use relay_processing::{relay_media, RelayContext};
use tempfile::TempDir;

struct StubFetcher {
    calls: AtomicUsize,
    payload: Option<Vec<u8>>,
    fail_after_write: bool,
    last_destination: Mutex<Option<PathBuf>>,
}

impl StubFetcher {
    fn with_payload(data: &[u8]) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            payload: Some(data.to_vec()),
            fail_after_write: false,
            last_destination: Mutex::new(None),
        }
    }

    fn writing_nothing() -> Self {
        Self {
            payload: None,
            ..Self::with_payload(b"")
        }
    }

    fn failing_after_write(data: &[u8]) -> Self {
        Self {
            fail_after_write: true,
            ..Self::with_payload(data)
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_destination(&self) -> Option<PathBuf> {
        self.last_destination.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaFetcher for StubFetcher {
    async fn fetch(&self, _remote_handle: &str, destination: &Path) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_destination.lock().unwrap() = Some(destination.to_path_buf());
        if let Some(data) = &self.payload {
            tokio::fs::write(destination, data).await?;
        }
        if self.fail_after_write {
            anyhow::bail!("telegram download interrupted");
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum StoreMode {
    /// Behaves like Immich: known checksums are reported as duplicates.
    Deduplicating,
    Rejecting,
    Unreachable,
    Panicking,
}

struct StubStore {
    mode: StoreMode,
    checksums: Mutex<HashSet<String>>,
    uploads: Mutex<Vec<AssetUpload>>,
    patches: AtomicUsize,
}

impl StubStore {
    fn new(mode: StoreMode) -> Self {
        Self {
            mode,
            checksums: Mutex::new(HashSet::new()),
            uploads: Mutex::new(Vec::new()),
            patches: AtomicUsize::new(0),
        }
    }

    fn uploads(&self) -> Vec<AssetUpload> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetStore for StubStore {
    async fn create_asset(&self, upload: &AssetUpload) -> anyhow::Result<StoreResponse> {
        assert!(upload.path.exists(), "staged file must exist during upload");
        self.uploads.lock().unwrap().push(upload.clone());

        match self.mode {
            StoreMode::Unreachable => anyhow::bail!("connection refused"),
            StoreMode::Panicking => panic!("store crashed mid-upload"),
            StoreMode::Rejecting => Ok(StoreResponse {
                status: 500,
                body: r#"{"message":"storage full"}"#.to_string(),
            }),
            StoreMode::Deduplicating => {
                let fresh = self.checksums.lock().unwrap().insert(upload.checksum.clone());
                Ok(if fresh {
                    StoreResponse {
                        status: 201,
                        body: r#"{"id":"asset-1","status":"created"}"#.to_string(),
                    }
                } else {
                    StoreResponse {
                        status: 200,
                        body: r#"{"id":"asset-1","status":"duplicate"}"#.to_string(),
                    }
                })
            }
        }
    }

    async fn set_date_time_original(
        &self,
        _asset_id: &str,
        _date_time_original: &str,
    ) -> anyhow::Result<StoreResponse> {
        self.patches.fetch_add(1, Ordering::SeqCst);
        Ok(StoreResponse {
            status: 200,
            body: "{}".to_string(),
        })
    }
}

fn config(staging_dir: &TempDir) -> Config {
    let settings = Settings {
        immich_api_url: "http://immich.local/api".to_string(),
        immich_api_key: "key".to_string(),
        selected_album_id: None,
        upload_timezone: chrono_tz::Europe::Moscow,
        telegram_bot_token: "123:abc".to_string(),
        allowed_user_ids: AllowList::new([111, 222]),
        staging_dir: staging_dir.path().to_path_buf(),
    };
    Config::new(settings, None)
}

fn notification(sender_id: u64, kind: MediaKind, handle: &str) -> MediaNotification {
    MediaNotification {
        sender: Sender {
            id: sender_id,
            display_name: format!("user{}", sender_id),
        },
        kind,
        remote_handle: handle.to_string(),
    }
}

fn staged_files(dir: &TempDir) -> usize {
    std::fs::read_dir(dir.path()).unwrap().count()
}

#[tokio::test]
async fn unauthorized_sender_never_downloads() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let fetcher = StubFetcher::with_payload(b"jpeg");
    let store = StubStore::new(StoreMode::Deduplicating);
    let ctx = RelayContext {
        config: &config,
        fetcher: &fetcher,
        store: &store,
    };

    let reply = relay_media(ctx, &notification(333, MediaKind::Photo, "p1")).await;
    assert_eq!(reply, Reply::Unauthorized);
    assert_eq!(fetcher.calls(), 0);
    assert!(store.uploads().is_empty());
}

#[tokio::test]
async fn unsupported_document_never_downloads() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let fetcher = StubFetcher::with_payload(b"%PDF");
    let store = StubStore::new(StoreMode::Deduplicating);
    let ctx = RelayContext {
        config: &config,
        fetcher: &fetcher,
        store: &store,
    };

    let kind = MediaKind::Document {
        mime_type: Some("application/pdf".to_string()),
        file_name: Some("report.pdf".to_string()),
    };
    let reply = relay_media(ctx, &notification(111, kind, "d1")).await;
    assert_eq!(reply, Reply::UnsupportedMedia);
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn successful_upload_removes_staged_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let fetcher = StubFetcher::with_payload(b"not really a jpeg");
    let store = StubStore::new(StoreMode::Deduplicating);
    let ctx = RelayContext {
        config: &config,
        fetcher: &fetcher,
        store: &store,
    };

    let reply = relay_media(ctx, &notification(111, MediaKind::Photo, "AgAD")).await;
    assert_eq!(
        reply,
        Reply::Uploaded {
            date_corrected: true
        }
    );

    let uploads = store.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].device_asset_id, "photo_AgAD.jpg");
    assert_eq!(uploads[0].size_bytes, 17);
    assert_eq!(uploads[0].checksum.len(), 40);
    assert!(uploads[0].metadata.file_created_at.ends_with("+03:00"));

    assert_eq!(
        fetcher.last_destination(),
        Some(dir.path().join("photo_AgAD.jpg"))
    );
    assert_eq!(staged_files(&dir), 0);
}

#[tokio::test]
async fn rejected_upload_reports_body_and_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let fetcher = StubFetcher::with_payload(b"mp4 bytes");
    let store = StubStore::new(StoreMode::Rejecting);
    let ctx = RelayContext {
        config: &config,
        fetcher: &fetcher,
        store: &store,
    };

    let reply = relay_media(ctx, &notification(222, MediaKind::Video, "v1")).await;
    assert_eq!(
        reply.to_string(),
        r#"❌ Failed to upload asset. Error: {"message":"storage full"}"#
    );
    assert_eq!(store.uploads()[0].device_asset_id, "video_v1.mp4");
    assert_eq!(staged_files(&dir), 0);
}

#[tokio::test]
async fn transport_failure_is_internal_error_and_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let fetcher = StubFetcher::with_payload(b"data");
    let store = StubStore::new(StoreMode::Unreachable);
    let ctx = RelayContext {
        config: &config,
        fetcher: &fetcher,
        store: &store,
    };

    match relay_media(ctx, &notification(111, MediaKind::Photo, "p2")).await {
        Reply::InternalError { message } => assert!(message.contains("connection refused")),
        other => panic!("Expected InternalError, got {:?}", other),
    }
    assert_eq!(staged_files(&dir), 0);
}

#[tokio::test]
async fn missing_download_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let fetcher = StubFetcher::writing_nothing();
    let store = StubStore::new(StoreMode::Deduplicating);
    let ctx = RelayContext {
        config: &config,
        fetcher: &fetcher,
        store: &store,
    };

    let reply = relay_media(ctx, &notification(111, MediaKind::Photo, "p3")).await;
    assert_eq!(reply, Reply::DownloadFailed);
    assert_eq!(fetcher.calls(), 1);
    assert!(store.uploads().is_empty());
}

#[tokio::test]
async fn interrupted_download_leaves_nothing_behind() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let fetcher = StubFetcher::failing_after_write(b"partial");
    let store = StubStore::new(StoreMode::Deduplicating);
    let ctx = RelayContext {
        config: &config,
        fetcher: &fetcher,
        store: &store,
    };

    let reply = relay_media(ctx, &notification(111, MediaKind::Video, "v2")).await;
    assert_eq!(reply, Reply::DownloadFailed);
    assert_eq!(staged_files(&dir), 0);
}

#[tokio::test]
async fn same_content_twice_is_uploaded_then_duplicate() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let fetcher = StubFetcher::with_payload(b"identical bytes");
    let store = StubStore::new(StoreMode::Deduplicating);
    let ctx = RelayContext {
        config: &config,
        fetcher: &fetcher,
        store: &store,
    };

    let first = relay_media(ctx, &notification(111, MediaKind::Photo, "a")).await;
    let second = relay_media(ctx, &notification(111, MediaKind::Photo, "b")).await;

    assert_eq!(
        first,
        Reply::Uploaded {
            date_corrected: true
        }
    );
    assert_eq!(second, Reply::Duplicate);
    assert_eq!(second.to_string(), "ℹ️ Asset already exists in Immich.");
    assert_eq!(store.patches.load(Ordering::SeqCst), 1);

    let uploads = store.uploads();
    assert_eq!(uploads[0].checksum, uploads[1].checksum);
    assert_eq!(staged_files(&dir), 0);
}

#[tokio::test]
async fn panic_during_upload_still_removes_staged_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let fetcher = StubFetcher::with_payload(b"jpeg bytes");
    let store = StubStore::new(StoreMode::Panicking);
    let ctx = RelayContext {
        config: &config,
        fetcher: &fetcher,
        store: &store,
    };

    let outcome = AssertUnwindSafe(relay_media(ctx, &notification(111, MediaKind::Photo, "p4")))
        .catch_unwind()
        .await;

    let payload = outcome.expect_err("store panic should propagate out of the pipeline");
    assert_eq!(
        payload.downcast_ref::<&str>(),
        Some(&"store crashed mid-upload")
    );
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(store.uploads().len(), 1);
    assert_eq!(staged_files(&dir), 0);
}
