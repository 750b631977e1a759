//! Media ingestion for the Immich relay.
//!
//! Leaf-first: checksum and capture-time extraction, the media dispatcher,
//! the staging guard for temporary files, and the upload protocol plus the
//! end-to-end pipeline that ties them together.

pub mod checksum;
pub mod dispatch;
pub mod metadata;
pub mod staging;
pub mod upload;

pub use checksum::{sha1_hex, sha1_hex_chunked};
pub use dispatch::{dispatch, DispatchedMedia};
pub use metadata::{capture_metadata, format_timestamp};
pub use staging::{stage, StagedFile};
pub use upload::{relay_media, upload_asset, RelayContext};
