use chrono::{DateTime, Utc};

use crate::analysis::{sentiment, summarize, truncate_chars, Sentiment, SentimentScorer};
use crate::config::PublishConfig;
use crate::news::Article;

/// Discord embed title limit
pub const TITLE_MAX_CHARS: usize = 256;
pub const SENTIMENT_FIELD: &str = "Sentiment";

/// A formatted headline ready to post
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub title: String,
    /// Summary of the article description
    pub description: String,
    pub url: String,
    pub sentiment: Sentiment,
    pub timestamp: DateTime<Utc>,
    pub thumbnail: Option<String>,
    pub footer: String,
}

impl OutboundMessage {
    pub fn color(&self) -> u32 {
        self.sentiment.color()
    }
}

/// Analyze an article and turn it into an outbound message
pub fn format_news_message(
    article: &Article,
    scorer: &dyn SentimentScorer,
    config: &PublishConfig,
) -> OutboundMessage {
    let sentiment = sentiment(scorer, &article.sentiment_text());

    OutboundMessage {
        title: truncate_chars(article.title(), TITLE_MAX_CHARS).to_string(),
        description: summarize(article.description(), config.summary_max_length),
        url: article.url().to_string(),
        sentiment,
        timestamp: Utc::now(),
        thumbnail: article.image_url().map(str::to_string),
        footer: config.footer.clone(),
    }
}
