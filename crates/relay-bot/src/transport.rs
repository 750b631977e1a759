//! Telegram side of the relay: message conversion and file download.

use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use relay_core::models::{MediaKind, MediaNotification, Sender};
use relay_core::MediaFetcher;
use teloxide::net::Download;
use teloxide::prelude::*;
use tokio::io::AsyncWriteExt;

/// Downloads Telegram files through the Bot API.
#[derive(Clone)]
pub struct TelegramFetcher {
    bot: Bot,
}

impl TelegramFetcher {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MediaFetcher for TelegramFetcher {
    async fn fetch(&self, remote_handle: &str, destination: &Path) -> anyhow::Result<()> {
        let file = self
            .bot
            .get_file(remote_handle.to_owned())
            .await
            .context("Failed to get file info from Telegram")?;

        let mut dst = tokio::fs::File::create(destination)
            .await
            .with_context(|| format!("Failed to create {}", destination.display()))?;
        self.bot
            .download_file(&file.path, &mut dst)
            .await
            .context("Failed to download file from Telegram")?;
        dst.flush().await?;

        tracing::debug!(path = %destination.display(), "Media file downloaded");
        Ok(())
    }
}

/// True for messages carrying a photo, video or document.
pub fn is_media(msg: &Message) -> bool {
    msg.photo().is_some() || msg.video().is_some() || msg.document().is_some()
}

/// Convert a media message into a notification. `None` for messages without
/// a sender or without supported media.
pub fn notification_from_message(msg: &Message) -> Option<MediaNotification> {
    let user = msg.from.as_ref()?;
    let sender = Sender {
        id: user.id.0,
        display_name: user
            .username
            .clone()
            .unwrap_or_else(|| user.first_name.clone()),
    };

    let (kind, remote_handle) = if let Some(photos) = msg.photo() {
        // Sizes are ordered; the last one is the original resolution.
        (MediaKind::Photo, photos.last()?.file.id.to_string())
    } else if let Some(video) = msg.video() {
        (MediaKind::Video, video.file.id.to_string())
    } else if let Some(document) = msg.document() {
        (
            MediaKind::Document {
                mime_type: document.mime_type.as_ref().map(ToString::to_string),
                file_name: document.file_name.clone(),
            },
            document.file.id.to_string(),
        )
    } else {
        return None;
    };

    Some(MediaNotification {
        sender,
        kind,
        remote_handle,
    })
}
