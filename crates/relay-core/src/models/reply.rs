use std::fmt::{Display, Formatter, Result as FmtResult};

use super::upload::UploadResult;

/// The single text message sent back to the sender for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Unauthorized,
    UnsupportedMedia,
    DownloadFailed,
    UploadRejected { body: String },
    Duplicate,
    Uploaded { date_corrected: bool },
    InternalError { message: String },
}

impl From<UploadResult> for Reply {
    fn from(result: UploadResult) -> Self {
        match result {
            UploadResult::Uploaded { date_corrected, .. } => Reply::Uploaded { date_corrected },
            UploadResult::Duplicate => Reply::Duplicate,
            UploadResult::Rejected { body, .. } => Reply::UploadRejected { body },
            UploadResult::Failed(message) => Reply::InternalError { message },
        }
    }
}

impl Display for Reply {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Reply::Unauthorized => write!(f, "❌ You are not authorized to use this bot."),
            Reply::UnsupportedMedia => {
                write!(f, "❌ Unsupported file: only photos and videos can be uploaded.")
            }
            Reply::DownloadFailed => write!(f, "❌ Failed to download file."),
            Reply::UploadRejected { body } => {
                write!(f, "❌ Failed to upload asset. Error: {}", body)
            }
            Reply::Duplicate => write!(f, "ℹ️ Asset already exists in Immich."),
            Reply::Uploaded {
                date_corrected: true,
            } => write!(f, "✅ Asset uploaded successfully!"),
            Reply::Uploaded {
                date_corrected: false,
            } => write!(
                f,
                "✅ Asset uploaded successfully! (capture date could not be corrected)"
            ),
            Reply::InternalError { message } => write!(f, "❌ An error occurred: {}", message),
        }
    }
}
