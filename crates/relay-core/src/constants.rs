//! Fixed identifiers and media tables.

/// Display name used in banners and help output.
pub const BOT_NAME: &str = "Telegram to Immich Bot";

/// Bot version, taken from the workspace package version.
pub const BOT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `deviceId` sent with every asset upload.
pub const DEVICE_ID: &str = "telegram-bot-device";

/// Default IANA timezone used to label capture timestamps.
pub const DEFAULT_UPLOAD_TIMEZONE: &str = "Europe/Moscow";

/// Chunk size for streaming checksums.
pub const CHECKSUM_CHUNK_SIZE: usize = 64 * 1024;

/// Timeout applied to the lightweight status calls (ping, current user, album lookup).
pub const STATUS_TIMEOUT_SECS: u64 = 5;

pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tiff", "heic", "heif", "webp",
];

pub const SUPPORTED_VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "webm", "mpg", "mpeg"];

/// Human readable list for the `/files` command.
pub const SUPPORTED_FILE_TYPES: &str =
    "Images: JPG, PNG, GIF, BMP, TIFF, HEIC, WEBP\nVideos: MP4, AVI, MOV, WEBM, MPEG";
