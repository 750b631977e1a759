//! Error types module
//!
//! Every failure of a relay invocation is one of the `IngestError` variants.
//! All of them are terminal for the invocation; none is retried. Each variant
//! describes how it is logged and which reply the sender receives.

use std::io;

use crate::models::Reply;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected rejections like unsupported files
    Debug,
    /// Warning level - for refused or failed requests worth noticing
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Unauthorized sender: {sender_id}")]
    Unauthorized { sender_id: u64 },

    #[error("Unsupported media type: {mime_type}")]
    UnsupportedMedia { mime_type: String },

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Upload rejected with status {status}: {body}")]
    UploadRejected { status: u16, body: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl IngestError {
    pub fn internal(message: impl Into<String>) -> Self {
        IngestError::Internal {
            message: message.into(),
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            IngestError::UnsupportedMedia { .. } => LogLevel::Debug,
            IngestError::Unauthorized { .. } | IngestError::UploadRejected { .. } => {
                LogLevel::Warn
            }
            IngestError::DownloadFailed(_) | IngestError::Internal { .. } => LogLevel::Error,
        }
    }

    /// Reply sent to the sender for this failure.
    pub fn reply(&self) -> Reply {
        match self {
            IngestError::Unauthorized { .. } => Reply::Unauthorized,
            IngestError::UnsupportedMedia { .. } => Reply::UnsupportedMedia,
            IngestError::DownloadFailed(_) => Reply::DownloadFailed,
            IngestError::UploadRejected { body, .. } => Reply::UploadRejected { body: body.clone() },
            IngestError::Internal { message } => Reply::InternalError {
                message: message.clone(),
            },
        }
    }
}

impl From<io::Error> for IngestError {
    fn from(err: io::Error) -> Self {
        IngestError::internal(format!("IO error: {}", err))
    }
}

impl From<anyhow::Error> for IngestError {
    fn from(err: anyhow::Error) -> Self {
        IngestError::internal(format!("{:#}", err))
    }
}
