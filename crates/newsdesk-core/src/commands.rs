use crate::config::DiscordConfig;
use crate::context::AppContext;
use crate::publish::{send_news_update, BatchOutcome};

pub const ACK_COMPLETE: &str = "News update complete!";
pub const ACK_CHANNEL_MISSING: &str = "News channel is not available.";
pub const ACK_BUSY: &str = "A news update is already running.";

/// Whether a chat message invokes the news command.
///
/// The first word must match `{prefix}{name}` exactly; anything after it is ignored.
pub fn is_news_command(content: &str, config: &DiscordConfig) -> bool {
    content.split_whitespace().next() == Some(config.command().as_str())
}

/// Run one batch for a user command and build the reply for the invoker
pub async fn run_news_command(ctx: &AppContext) -> String {
    match send_news_update(ctx).await {
        Ok(BatchOutcome::Published { .. }) | Ok(BatchOutcome::NoArticles) => ACK_COMPLETE.to_string(),
        Ok(BatchOutcome::ChannelMissing) => ACK_CHANNEL_MISSING.to_string(),
        Ok(BatchOutcome::Busy) => ACK_BUSY.to_string(),
        Err(e) => {
            tracing::error!("News command failed: {}", e);
            format!("News update failed: {}", e)
        }
    }
}
