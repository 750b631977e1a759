//! Upload protocol and the end-to-end relay pipeline.

mod orchestrator;
mod pipeline;

pub use orchestrator::upload_asset;
pub use pipeline::{relay_media, RelayContext};
