use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::models::{ApiErrorBody, Article, HeadlinesResponse};
use super::HeadlineSource;
use crate::config::AppConfig;
use crate::{Error, Result};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client for the NewsAPI top-headlines endpoint
pub struct NewsFetcher {
    client: Client,
    endpoint: String,
    api_key: String,
    category: String,
}

impl NewsFetcher {
    /// Create a new fetcher from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Self::build_client(config.news.request_timeout_secs)?;

        Ok(Self {
            client,
            endpoint: config.news.endpoint.clone(),
            api_key: config.news.api_key.clone().unwrap_or_default(),
            category: config.news.category.clone(),
        })
    }

    fn build_client(timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .map_err(Error::Http)
    }

    /// Fetch top headlines, surfacing every failure to the caller
    pub async fn top_headlines(&self, country: &str, page_size: u32) -> Result<Vec<Article>> {
        let page_size = page_size.to_string();

        tracing::debug!("Requesting top headlines (country={}, pageSize={})", country, page_size);

        // Strip URLs from transport errors: the query string carries the API key.
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("country", country),
                ("apiKey", self.api_key.as_str()),
                ("pageSize", page_size.as_str()),
                ("category", self.category.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| Error::Http(e.without_url()))?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| match (b.code, b.message) {
                    (Some(code), Some(message)) => Some(format!("{} ({})", message, code)),
                    (None, Some(message)) => Some(message),
                    (Some(code), None) => Some(code),
                    (None, None) => None,
                })
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            return Err(Error::NewsApi(format!("HTTP {}: {}", status.as_u16(), detail)));
        }

        let parsed: HeadlinesResponse = serde_json::from_slice(&body)?;
        tracing::info!(
            "Fetched {} headlines (total available: {})",
            parsed.articles.len(),
            parsed.total_results.unwrap_or_default()
        );

        Ok(parsed.articles)
    }
}

#[async_trait]
impl HeadlineSource for NewsFetcher {
    async fn fetch(&self, country: &str, page_size: u32) -> Vec<Article> {
        match self.top_headlines(country, page_size).await {
            Ok(articles) => articles,
            Err(e) => {
                tracing::error!("Error fetching news: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use crate::testing::LogCapture;

    /// Serve a single canned HTTP response, returning the request head
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{}/v2/top-headlines", addr), handle)
    }

    fn fetcher_for(endpoint: String) -> NewsFetcher {
        let mut config = AppConfig::default();
        config.news.endpoint = endpoint;
        config.news.api_key = Some("test-key".to_string());
        config.news.request_timeout_secs = 5;
        NewsFetcher::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_articles_in_order() {
        let (endpoint, server) = serve_once(
            "200 OK",
            r#"{"status":"ok","totalResults":2,"articles":[
                {"title":"First","description":"One.","url":"https://a.example"},
                {"title":"Second","description":null,"url":"https://b.example"}
            ]}"#,
        )
        .await;

        let fetcher = fetcher_for(endpoint);
        let articles = fetcher.fetch("us", 5).await;

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title(), "First");
        assert_eq!(articles[1].title(), "Second");
        assert_eq!(articles[1].description(), "");

        let request = server.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /v2/top-headlines?"));
        assert!(request_line.contains("country=us"));
        assert!(request_line.contains("apiKey=test-key"));
        assert!(request_line.contains("pageSize=5"));
        assert!(request_line.contains("category=general"));
        assert!(request.to_lowercase().contains("user-agent: newsdesk-core/"));
    }

    #[tokio::test]
    async fn test_error_status_surfaces_api_message() {
        let (endpoint, server) = serve_once(
            "401 Unauthorized",
            r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#,
        )
        .await;

        let fetcher = fetcher_for(endpoint);
        let err = fetcher.top_headlines("us", 5).await.unwrap_err();
        match err {
            Error::NewsApi(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("apiKeyInvalid"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_server_error_fetch_is_empty() {
        let logs = LogCapture::default();
        let _guard = logs.install();
        let (endpoint, server) = serve_once("500 Internal Server Error", "oops").await;

        let fetcher = fetcher_for(endpoint);
        assert!(fetcher.fetch("us", 5).await.is_empty());
        server.await.unwrap();

        let errors = logs.lines("ERROR");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Error fetching news"));
        assert!(errors[0].contains("500"));
    }

    #[tokio::test]
    async fn test_missing_articles_field_is_empty() {
        let (endpoint, server) = serve_once("200 OK", r#"{"status":"ok"}"#).await;

        let fetcher = fetcher_for(endpoint);
        assert!(fetcher.fetch("us", 5).await.is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_refused_is_empty() {
        // Bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = fetcher_for(format!("http://{}/v2/top-headlines", addr));
        let err = fetcher.top_headlines("us", 5).await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
        assert!(!err.to_string().contains("test-key"));

        let logs = LogCapture::default();
        let _guard = logs.install();
        assert!(fetcher.fetch("us", 5).await.is_empty());

        let errors = logs.lines("ERROR");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Error fetching news"));
        assert!(!errors[0].contains("test-key"));
    }
}
