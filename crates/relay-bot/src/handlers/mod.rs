//! Update routing.

pub mod commands;
pub mod media;

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::transport::is_media;

pub type HandlerResult = Result<(), teloxide::RequestError>;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "show the help message.")]
    Start,
    #[command(description = "show the help message.")]
    Help,
    #[command(description = "show bot version.")]
    Version,
    #[command(description = "show supported file types.")]
    Files,
}

/// Commands first, then photo/video/document messages. Anything else is ignored.
pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(commands::handle_command),
        )
        .branch(dptree::filter(|msg: Message| is_media(&msg)).endpoint(media::handle_media))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("/start", "relay_bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/files", "relay_bot").unwrap(), Command::Files);
        assert_eq!(
            Command::parse("/version@relay_bot", "relay_bot").unwrap(),
            Command::Version
        );
        assert!(Command::parse("/upload", "relay_bot").is_err());
    }
}
