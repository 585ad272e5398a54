mod batch;
mod message;

pub use batch::{send_news_update, BatchOutcome, NO_ARTICLES_NOTICE, SEND_DELAY};
pub use message::{format_news_message, OutboundMessage, SENTIMENT_FIELD, TITLE_MAX_CHARS};
