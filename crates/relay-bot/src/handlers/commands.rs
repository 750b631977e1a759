use std::sync::Arc;

use teloxide::prelude::*;

use super::{Command, HandlerResult};
use crate::state::AppState;
use crate::status::{files_message, help_message, version_message, ServerStatus};

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<AppState>,
) -> HandlerResult {
    tracing::debug!(chat_id = msg.chat.id.0, command = ?cmd, "Command received");

    let text = match cmd {
        Command::Start | Command::Help => {
            let status = ServerStatus::probe(&state.immich).await;
            help_message(&status)
        }
        Command::Version => version_message(),
        Command::Files => files_message(),
    };

    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}
