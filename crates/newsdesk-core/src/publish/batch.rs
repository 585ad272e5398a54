use std::fmt;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::message::format_news_message;
use crate::context::AppContext;
use crate::Result;

/// Pause between consecutive headline posts
pub const SEND_DELAY: Duration = Duration::from_secs(1);
pub const NO_ARTICLES_NOTICE: &str = "No news articles found at this time.";

/// How a batch ended when it did not fail outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every fetched headline was posted
    Published { sent: usize },
    /// Nothing came back from the news service; a notice was posted instead
    NoArticles,
    /// The destination channel could not be resolved; nothing was posted
    ChannelMissing,
    /// Another batch was already running; this one was skipped
    Busy,
}

impl fmt::Display for BatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Published { sent } => write!(f, "published {} headlines", sent),
            Self::NoArticles => f.write_str("no articles found"),
            Self::ChannelMissing => f.write_str("channel not found"),
            Self::Busy => f.write_str("skipped, another update is running"),
        }
    }
}

/// Fetch, analyze and post one round of headlines.
///
/// Fetch failures degrade to the "no articles" notice. A send failure stops
/// the batch and is returned to the caller; messages already sent stay sent.
pub async fn send_news_update(ctx: &AppContext) -> Result<BatchOutcome> {
    let Some(_guard) = ctx.try_begin_batch() else {
        warn!("News update already in progress, skipping");
        return Ok(BatchOutcome::Busy);
    };

    let channel_id = ctx.config().channel_id();
    if !ctx.chat().channel_exists(channel_id).await {
        error!("Channel not found: {}", channel_id);
        return Ok(BatchOutcome::ChannelMissing);
    }

    let news = &ctx.config().news;
    let articles = ctx.source().fetch(&news.country, news.page_size).await;

    if articles.is_empty() {
        info!("No articles to publish");
        ctx.chat().send_text(channel_id, NO_ARTICLES_NOTICE).await?;
        return Ok(BatchOutcome::NoArticles);
    }

    info!("Publishing {} headlines to channel {}", articles.len(), channel_id);

    for (index, article) in articles.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(SEND_DELAY).await;
        }

        let message = format_news_message(article, ctx.scorer(), &ctx.config().publish);
        debug!(
            "Posting '{}' ({}, source: {})",
            message.title,
            message.sentiment,
            article.source_name().unwrap_or("unknown")
        );

        if let Err(e) = ctx.chat().send_message(channel_id, &message).await {
            error!("Failed to post headline {}/{}: {}", index + 1, articles.len(), e);
            return Err(e);
        }
    }

    Ok(BatchOutcome::Published { sent: articles.len() })
}
