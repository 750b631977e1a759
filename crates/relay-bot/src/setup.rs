//! Startup: album resolution and the startup broadcast.

use relay_core::{Config, Settings};
use relay_immich_client::ImmichClient;
use teloxide::prelude::*;

use crate::state::AppState;
use crate::status::{startup_message, ServerStatus};

/// Resolve the selected album's name and freeze the configuration.
///
/// A failed lookup is logged and leaves the name unset; the relay does not
/// depend on it.
pub async fn build_config(settings: Settings, client: &ImmichClient) -> Config {
    let album_name = match settings.selected_album_id.as_deref() {
        Some(album_id) => match client.album(album_id).await {
            Ok(album) => {
                tracing::info!(album_id = %album_id, album = %album.album_name, "Selected album resolved");
                Some(album.album_name)
            }
            Err(e) => {
                tracing::warn!(album_id = %album_id, error = %e, "Failed to resolve selected album");
                None
            }
        },
        None => None,
    };
    Config::new(settings, album_name)
}

/// Send the startup banner to every allowed user. Failures are per user.
pub async fn send_startup_message(bot: &Bot, state: &AppState) {
    let status = ServerStatus::probe(&state.immich).await;
    let text = startup_message(&status, state.config.selected_album_name());
    let recipients = state.config.allowed_user_ids();

    tracing::info!(count = recipients.len(), "Sending startup messages");
    for user_id in recipients.iter() {
        let Ok(chat_id) = i64::try_from(user_id) else {
            tracing::error!(user_id, "User id does not fit a chat id");
            continue;
        };
        match bot.send_message(ChatId(chat_id), text.clone()).await {
            Ok(_) => tracing::info!(user_id, "Sent startup message"),
            Err(e) => tracing::error!(user_id, error = %e, "Failed to send startup message"),
        }
    }
}
