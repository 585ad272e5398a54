use serde::{Deserialize, Deserializer, Serialize};

pub const NO_TITLE: &str = "No title";
pub const NO_DESCRIPTION: &str = "No description";
pub const NO_URL: &str = "No URL";

/// Publisher block attached to each NewsAPI article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A headline as returned by the top-headlines endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: Option<ArticleSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Outer `None` = key absent, inner `None` = explicit null
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Marks a field as present even when its value is null
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl Article {
    /// Title, or a placeholder when the service omitted it
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(NO_TITLE)
    }

    /// Description text. A missing key yields a placeholder, a null yields ""
    pub fn description(&self) -> &str {
        match &self.description {
            None => NO_DESCRIPTION,
            Some(None) => "",
            Some(Some(text)) => text,
        }
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or(NO_URL)
    }

    /// Image URL, skipping empty strings
    pub fn image_url(&self) -> Option<&str> {
        self.url_to_image.as_deref().filter(|u| !u.trim().is_empty())
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.name.as_deref())
    }

    /// Text fed to the sentiment scorer
    pub fn sentiment_text(&self) -> String {
        format!("{} {}", self.title(), self.description())
    }
}

/// Body of a top-headlines response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlinesResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_results: Option<u64>,
    pub articles: Vec<Article>,
}

/// Error body NewsAPI sends with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
