use vader_sentiment::SentimentIntensityAnalyzer;

use super::sentiment::SentimentScorer;

/// Compound scores from the full VADER lexicon and rule set
pub struct Vader {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl Vader {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for Vader {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for Vader {
    fn compound(&self, text: &str) -> f64 {
        self.analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{sentiment, Sentiment};

    #[test]
    fn test_positive_headline() {
        let vader = Vader::new();
        let text = "Local team wins championship in a great victory";
        assert!(vader.compound(text) > 0.5);
        assert_eq!(sentiment(&vader, text), Sentiment::Positive);
    }

    #[test]
    fn test_negative_headline() {
        let vader = Vader::new();
        let text = "Earthquake kills dozens and destroys homes";
        assert!(vader.compound(text) < -0.5);
        assert_eq!(sentiment(&vader, text), Sentiment::Negative);
    }

    #[test]
    fn test_common_news_vocabulary_is_scored() {
        let vader = Vader::new();
        for text in [
            "Senator accused of crime, blames rivals",
            "Court finds the official report was wrong",
            "Mayor charged with criminal fraud",
        ] {
            assert_eq!(sentiment(&vader, text), Sentiment::Negative, "{}", text);
        }
        assert_eq!(
            sentiment(&vader, "Voters trust the new trade agreement"),
            Sentiment::Positive
        );
    }

    #[test]
    fn test_neutral_headline() {
        let vader = Vader::new();
        let text = "City council meets on Tuesday";
        assert_eq!(vader.compound(text), 0.0);
        assert_eq!(sentiment(&vader, text), Sentiment::Neutral);
        assert_eq!(vader.compound(""), 0.0);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let vader = Vader::new();
        assert!(vader.compound("The plan is good") > 0.0);
        assert!(vader.compound("The plan is not good") < 0.0);
    }

    #[test]
    fn test_caps_and_exclamation_emphasis() {
        let vader = Vader::new();
        let plain = vader.compound("This is great news");
        assert!(vader.compound("This is GREAT news") > plain);
        assert!(vader.compound("This is great news!!!") > plain);
    }

    #[test]
    fn test_compound_stays_in_range() {
        let vader = Vader::new();
        let score = vader.compound("WAR! KILLED! DEAD! terror murder disaster tragedy crisis!!!!");
        assert!((-1.0..=1.0).contains(&score));
        assert!(score < -0.9);
    }
}
