use std::sync::Arc;

use relay_bot::setup::{build_config, send_startup_message};
use relay_bot::telemetry::init_tracing;
use relay_bot::{schema, AppState};
use relay_core::constants::{BOT_NAME, BOT_VERSION};
use relay_core::Settings;
use relay_immich_client::ImmichClient;
use teloxide::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start bot");
            return Err(e.into());
        }
    };
    tracing::debug!(?settings, "Loaded settings");

    let immich = ImmichClient::new(settings.immich_api_url.clone(), settings.immich_api_key.clone())?;
    let config = build_config(settings, &immich).await;
    let bot = Bot::new(config.telegram_bot_token());
    let state = Arc::new(AppState::new(config, immich));

    send_startup_message(&bot, &state).await;

    let allowed: Vec<u64> = state.config.allowed_user_ids().iter().collect();
    tracing::info!(version = BOT_VERSION, "{} started successfully", BOT_NAME);
    tracing::info!(?allowed, "Allowed users");
    if let Some(album_id) = state.config.selected_album_id() {
        tracing::info!(
            album_id = %album_id,
            album = ?state.config.selected_album_name(),
            "Uploads target the selected album"
        );
    }

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
