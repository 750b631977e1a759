/// Where a capture timestamp came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampSource {
    /// EXIF `DateTimeOriginal`
    DateTimeOriginal,
    /// EXIF `DateTime`
    DateTime,
    /// Filesystem modification time (image without usable tags)
    FileModified,
    /// Wall clock at extraction time (not an image, or unreadable)
    Now,
}

/// Capture timestamps sent with an upload.
///
/// Both values are ISO-8601 with millisecond precision and an explicit
/// `+HH:MM` offset. They are always identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureMetadata {
    pub file_created_at: String,
    pub file_modified_at: String,
    pub source: TimestampSource,
}

impl CaptureMetadata {
    pub fn new(timestamp: String, source: TimestampSource) -> Self {
        Self {
            file_modified_at: timestamp.clone(),
            file_created_at: timestamp,
            source,
        }
    }
}

/// Terminal outcome of the upload protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResult {
    /// A new asset was created. `date_corrected` is false when the follow-up
    /// timestamp patch did not succeed.
    Uploaded {
        asset_id: String,
        date_corrected: bool,
    },
    /// The service already holds an asset with the same checksum.
    Duplicate,
    /// The service answered with a status outside {200, 201}.
    Rejected { status: u16, body: String },
    /// Transport failure or unreadable response.
    Failed(String),
}
