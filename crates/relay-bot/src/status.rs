//! Immich status probe and the informational messages built from it.

use relay_core::constants::{BOT_NAME, BOT_VERSION, SUPPORTED_FILE_TYPES};
use relay_immich_client::{ClientError, ImmichClient};

/// Connection and identity lines shown in `/help` and the startup banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStatus {
    pub connection: String,
    pub user: String,
}

impl Default for ServerStatus {
    fn default() -> Self {
        Self {
            connection: "❌ Disconnected".to_string(),
            user: "Unknown user".to_string(),
        }
    }
}

impl ServerStatus {
    /// Ping the server and, when it answers, look up the API key's user.
    /// Failures are folded into the status text.
    pub async fn probe(client: &ImmichClient) -> Self {
        let mut status = Self::default();

        match client.ping().await {
            Ok(200) => {
                status.connection = format!("✅ Connected to Immich ({})", client.base_url());
                match client.current_user().await {
                    Ok(user) => status.user = user.display_label(),
                    Err(ClientError::Status { status: code, .. }) => {
                        tracing::warn!(status = code, "User lookup returned non-success status");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to get user info");
                        status.user = "⚠️ Could not retrieve user info".to_string();
                    }
                }
            }
            Ok(code) => {
                status.connection = format!("❌ Server ping failed (HTTP {})", code);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to Immich");
                status.connection = format!("❌ Connection failed: {}", e);
            }
        }

        status
    }
}

pub fn help_message(status: &ServerStatus) -> String {
    format!(
        "ℹ️ {BOT_NAME} v{BOT_VERSION}\n\n\
         {}\n\
         Logged in as {}\n\n\
         Available commands:\n\
         /help - Show this help message\n\
         /version - Show bot version\n\
         /files - Show supported file types\n\n\
         Send me files and I'll upload them to your Immich instance!",
        status.connection, status.user
    )
}

/// Banner broadcast to every allowed user at startup.
pub fn startup_message(status: &ServerStatus, album_name: Option<&str>) -> String {
    let mut message = format!(
        "🤖 {BOT_NAME} v{BOT_VERSION} has started!\n\n{}\nLogged in as {}\n",
        status.connection, status.user
    );
    if let Some(album) = album_name {
        message.push_str(&format!("📁 Selected album: {}\n", album));
    }
    message.push_str("\nBot is ready to receive your files.");
    message
}

pub fn version_message() -> String {
    format!("📋 {BOT_NAME} version: {BOT_VERSION}")
}

pub fn files_message() -> String {
    format!("📄 Supported file types:\n{SUPPORTED_FILE_TYPES}")
}
