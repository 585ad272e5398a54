mod fetcher;
mod models;

pub use fetcher::NewsFetcher;
pub use models::{Article, ArticleSource, HeadlinesResponse, NO_DESCRIPTION, NO_TITLE, NO_URL};

/// Anything that can supply a batch of headlines
#[async_trait::async_trait]
pub trait HeadlineSource: Send + Sync {
    /// Fetch headlines in service order. Failures are logged and yield an empty list.
    async fn fetch(&self, country: &str, page_size: u32) -> Vec<Article>;
}
