mod discord;

pub use discord::{build_embed, DiscordSink};

use crate::publish::OutboundMessage;
use crate::Result;

/// Trait for the chat platform a batch posts into
#[async_trait::async_trait]
pub trait ChatSink: Send + Sync {
    /// Whether the channel can be resolved
    async fn channel_exists(&self, channel_id: u64) -> bool;

    /// Post a plain text message
    async fn send_text(&self, channel_id: u64, content: &str) -> Result<()>;

    /// Post a rich headline message
    async fn send_message(&self, channel_id: u64, message: &OutboundMessage) -> Result<()>;
}
