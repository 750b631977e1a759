use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use relay_core::models::Reply;
use relay_processing::{relay_media, RelayContext};
use teloxide::prelude::*;

use super::HandlerResult;
use crate::state::AppState;
use crate::transport::{notification_from_message, TelegramFetcher};

/// Relay one media message and answer with exactly one reply.
pub async fn handle_media(bot: Bot, msg: Message, state: Arc<AppState>) -> HandlerResult {
    let Some(notification) = notification_from_message(&msg) else {
        tracing::debug!(chat_id = msg.chat.id.0, "Media message without sender ignored");
        return Ok(());
    };

    let fetcher = TelegramFetcher::new(bot.clone());
    let ctx = RelayContext {
        config: &state.config,
        fetcher: &fetcher,
        store: &state.immich,
    };

    // The staging guard has already run by the time a panic reaches here.
    let reply = match AssertUnwindSafe(relay_media(ctx, &notification))
        .catch_unwind()
        .await
    {
        Ok(reply) => reply,
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            tracing::error!(
                sender_id = notification.sender.id,
                panic = %message,
                "Media handler panicked"
            );
            Reply::InternalError { message }
        }
    };

    bot.send_message(msg.chat.id, reply.to_string()).await?;
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected failure".to_string()
    }
}
