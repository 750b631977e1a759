//! Telegram front end of the Immich relay.
//!
//! Routes updates with teloxide, answers the informational commands, and
//! hands media messages to `relay_processing`.

pub mod handlers;
pub mod setup;
pub mod state;
pub mod status;
pub mod telemetry;
pub mod transport;

pub use handlers::{schema, Command};
pub use state::AppState;
pub use status::ServerStatus;
pub use transport::TelegramFetcher;
