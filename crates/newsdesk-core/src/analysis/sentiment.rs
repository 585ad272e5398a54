use serde::{Deserialize, Serialize};

/// Compound scores at or above this are positive
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores at or below this are negative
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Produces a compound polarity score in [-1, 1] for free text
pub trait SentimentScorer: Send + Sync {
    fn compound(&self, text: &str) -> f64;
}

/// Three-way sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Map a compound score onto a label
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            Self::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }

    /// Embed accent colour
    pub fn color(&self) -> u32 {
        match self {
            Self::Positive => 0x00ff00,
            Self::Negative => 0xff0000,
            Self::Neutral => 0x808080,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score `text` and label it
pub fn sentiment(scorer: &dyn SentimentScorer, text: &str) -> Sentiment {
    Sentiment::from_compound(scorer.compound(text))
}
