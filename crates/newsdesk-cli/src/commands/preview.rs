use std::sync::Arc;

use anyhow::{bail, Result};

use newsdesk_core::{
    analysis::Vader,
    news::NewsFetcher,
    publish::format_news_message,
    AppConfig,
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    if config.news.api_key.is_none() {
        bail!("News API key not configured (set NEWS_API_KEY)");
    }

    let fetcher = NewsFetcher::new(&config)?;
    let articles = fetcher
        .top_headlines(&config.news.country, config.news.page_size)
        .await?;

    if articles.is_empty() {
        println!("No news articles found at this time.");
        return Ok(());
    }

    let vader = Vader::new();

    println!("Top headlines ({}, {}):\n", config.news.country, config.news.category);

    for (i, article) in articles.iter().enumerate() {
        let message = format_news_message(article, &vader, &config.publish);
        let source = article
            .source_name()
            .map(|s| format!(" - {}", s))
            .unwrap_or_default();

        println!("{:>2}. [{}] {}{}", i + 1, message.sentiment, message.title, source);
        if !message.description.is_empty() {
            println!("    {}", message.description);
        }
        println!("    {}", message.url);
        println!();
    }

    Ok(())
}
