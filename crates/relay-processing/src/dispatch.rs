//! Media dispatch
//!
//! Classifies a notification into a MIME family and computes the local
//! filename it is staged under. No I/O happens here; a rejected document
//! never reaches the download step.

use relay_core::models::{MediaKind, MediaNotification, MimeCategory};
use relay_core::IngestError;

/// Result of classifying one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedMedia {
    /// Name the payload is staged under, also used as `deviceAssetId`.
    pub file_name: String,
    pub mime_type: String,
    pub category: MimeCategory,
}

/// Classify `notification` and resolve its local filename.
pub fn dispatch(notification: &MediaNotification) -> Result<DispatchedMedia, IngestError> {
    let (mime_type, category) = match &notification.kind {
        MediaKind::Photo => ("image/jpg".to_string(), MimeCategory::Image),
        MediaKind::Video => ("video/mp4".to_string(), MimeCategory::Video),
        MediaKind::Document { mime_type, .. } => {
            let declared = mime_type.clone().unwrap_or_default();
            match MimeCategory::from_mime(&declared) {
                Some(category) => (declared, category),
                None => {
                    return Err(IngestError::UnsupportedMedia {
                        mime_type: if declared.is_empty() {
                            "unknown".to_string()
                        } else {
                            declared
                        },
                    })
                }
            }
        }
    };

    Ok(DispatchedMedia {
        file_name: local_file_name(category, &notification.remote_handle),
        mime_type,
        category,
    })
}

fn local_file_name(category: MimeCategory, remote_handle: &str) -> String {
    let handle = sanitize_handle(remote_handle);
    match category {
        MimeCategory::Image => format!("photo_{}.jpg", handle),
        MimeCategory::Video => format!("video_{}.mp4", handle),
    }
}

/// Keep the handle usable as a single path component.
fn sanitize_handle(handle: &str) -> String {
    let sanitized: String = handle
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() {
        "file".to_string()
    } else {
        sanitized
    }
}
