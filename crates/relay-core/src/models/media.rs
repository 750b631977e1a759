use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;

use crate::constants::{SUPPORTED_IMAGE_EXTENSIONS, SUPPORTED_VIDEO_EXTENSIONS};

/// Who sent the media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: u64,
    pub display_name: String,
}

/// Kind of media attached to an inbound message.
///
/// Only documents carry a declared MIME type and an original filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
    Document {
        mime_type: Option<String>,
        file_name: Option<String>,
    },
}

impl MediaKind {
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
            MediaKind::Document { .. } => "document",
        }
    }
}

/// One inbound media event, immutable for the lifetime of the pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaNotification {
    pub sender: Sender,
    pub kind: MediaKind,
    /// Transport-side file handle used to download the payload.
    pub remote_handle: String,
}

/// MIME family accepted by the relay.
///
/// Validated documents map onto one of these two families, so every
/// downstream match is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeCategory {
    Image,
    Video,
}

impl MimeCategory {
    /// Classify a declared MIME type, `None` if it is neither `image/*` nor `video/*`.
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        let normalized = mime_type.trim().to_ascii_lowercase();
        if normalized.starts_with("image/") {
            Some(MimeCategory::Image)
        } else if normalized.starts_with("video/") {
            Some(MimeCategory::Video)
        } else {
            None
        }
    }
}

impl Display for MimeCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MimeCategory::Image => write!(f, "image"),
            MimeCategory::Video => write!(f, "video"),
        }
    }
}

/// Kind of a staged local file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagedKind {
    Image,
    Video,
    Other,
}

impl StagedKind {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some(ext) if SUPPORTED_IMAGE_EXTENSIONS.contains(&ext) => StagedKind::Image,
            Some(ext) if SUPPORTED_VIDEO_EXTENSIONS.contains(&ext) => StagedKind::Video,
            _ => StagedKind::Other,
        }
    }
}
