use std::sync::Arc;

use serenity::all::{ChannelId, Colour, CreateEmbed, CreateEmbedFooter, CreateMessage, Http, Timestamp};
use url::Url;

use super::ChatSink;
use crate::publish::{OutboundMessage, SENTIMENT_FIELD};
use crate::{Error, Result};

/// Posts messages through the Discord REST API
pub struct DiscordSink {
    http: Arc<Http>,
}

impl DiscordSink {
    /// Post through an existing client, sharing its rate limiter
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Standalone REST client for runs without a gateway connection
    pub fn with_token(token: &str) -> Self {
        Self::new(Arc::new(Http::new(token)))
    }

    fn channel(channel_id: u64) -> Result<ChannelId> {
        if channel_id == 0 {
            return Err(Error::Chat("channel id 0 is not valid".to_string()));
        }
        Ok(ChannelId::new(channel_id))
    }
}

/// Only absolute http(s) links are accepted as embed URLs
fn embed_link(link: &str) -> Option<&str> {
    Url::parse(link)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
        .map(|_| link)
}

/// Build the Discord embed for a headline
pub fn build_embed(message: &OutboundMessage) -> CreateEmbed {
    let timestamp = Timestamp::from_unix_timestamp(message.timestamp.timestamp())
        .unwrap_or_else(|_| Timestamp::now());

    let mut embed = CreateEmbed::new()
        .title(message.title.as_str())
        .description(message.description.as_str())
        .colour(Colour::new(message.color()))
        .timestamp(timestamp)
        .field(SENTIMENT_FIELD, message.sentiment.as_str(), true)
        .footer(CreateEmbedFooter::new(message.footer.as_str()));

    if let Some(link) = embed_link(&message.url) {
        embed = embed.url(link);
    }

    if let Some(ref thumbnail) = message.thumbnail {
        embed = embed.thumbnail(thumbnail.as_str());
    }

    embed
}

#[async_trait::async_trait]
impl ChatSink for DiscordSink {
    async fn channel_exists(&self, channel_id: u64) -> bool {
        let Ok(channel) = Self::channel(channel_id) else {
            return false;
        };

        match self.http.get_channel(channel).await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Channel lookup for {} failed: {}", channel_id, e);
                false
            }
        }
    }

    async fn send_text(&self, channel_id: u64, content: &str) -> Result<()> {
        Self::channel(channel_id)?.say(&self.http, content).await?;
        Ok(())
    }

    async fn send_message(&self, channel_id: u64, message: &OutboundMessage) -> Result<()> {
        let builder = CreateMessage::new().embed(build_embed(message));
        Self::channel(channel_id)?.send_message(&self.http, builder).await?;
        Ok(())
    }
}
