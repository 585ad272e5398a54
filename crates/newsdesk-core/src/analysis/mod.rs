mod sentiment;
mod summary;
mod vader;

pub use sentiment::{sentiment, Sentiment, SentimentScorer, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};
pub use summary::{summarize, truncate_chars};
pub use vader::Vader;
