//! In-memory fakes shared by unit tests

use std::io;
use std::sync::{Arc, Mutex};

use tokio::time::Instant;
use tracing_subscriber::fmt::MakeWriter;

use crate::analysis::SentimentScorer;
use crate::chat::ChatSink;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::news::{Article, HeadlineSource};
use crate::publish::OutboundMessage;
use crate::{Error, Result};

pub const TEST_CHANNEL: u64 = 4242;

pub struct FixedScorer(pub f64);

impl SentimentScorer for FixedScorer {
    fn compound(&self, _text: &str) -> f64 {
        self.0
    }
}

/// Returns the same articles on every fetch
pub struct StaticSource {
    articles: Vec<Article>,
}

impl StaticSource {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }
}

#[async_trait::async_trait]
impl HeadlineSource for StaticSource {
    async fn fetch(&self, _country: &str, _page_size: u32) -> Vec<Article> {
        self.articles.clone()
    }
}

#[derive(Debug, Clone)]
pub enum Sent {
    Text(String),
    Message(OutboundMessage),
}

/// Records every send along with the (tokio) time it happened
pub struct RecordingSink {
    channel_id: u64,
    fail_messages: bool,
    sent: Mutex<Vec<(Instant, Sent)>>,
}

impl RecordingSink {
    pub fn new(channel_id: u64) -> Self {
        Self {
            channel_id,
            fail_messages: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(channel_id: u64) -> Self {
        Self {
            fail_messages: true,
            ..Self::new(channel_id)
        }
    }

    pub fn sent(&self) -> Vec<(Instant, Sent)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.sent()
            .into_iter()
            .filter_map(|(_, s)| match s {
                Sent::Message(m) => Some(m),
                Sent::Text(_) => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|(_, s)| match s {
                Sent::Text(t) => Some(t),
                Sent::Message(_) => None,
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl ChatSink for RecordingSink {
    async fn channel_exists(&self, channel_id: u64) -> bool {
        channel_id == self.channel_id
    }

    async fn send_text(&self, _channel_id: u64, content: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((Instant::now(), Sent::Text(content.to_string())));
        Ok(())
    }

    async fn send_message(&self, _channel_id: u64, message: &OutboundMessage) -> Result<()> {
        if self.fail_messages {
            return Err(Error::Chat("Missing Permissions".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((Instant::now(), Sent::Message(message.clone())));
        Ok(())
    }
}

pub fn article(title: &str) -> Article {
    Article {
        title: Some(title.to_string()),
        description: Some(Some(format!("About {}.", title))),
        url: Some(format!("https://example.com/{}", title.to_lowercase().replace(' ', "-"))),
        ..Default::default()
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.news.api_key = Some("key".to_string());
    config.discord.token = Some("token".to_string());
    config.discord.channel_id = Some(TEST_CHANNEL);
    config
}

/// Context wired to fakes; the returned sink is shared with it
pub fn context(articles: Vec<Article>, sink: RecordingSink) -> (Arc<AppContext>, Arc<RecordingSink>) {
    context_with(test_config(), articles, sink)
}

pub fn context_with(
    config: AppConfig,
    articles: Vec<Article>,
    sink: RecordingSink,
) -> (Arc<AppContext>, Arc<RecordingSink>) {
    let sink = Arc::new(sink);
    let ctx = AppContext::new(
        Arc::new(config),
        Arc::new(StaticSource::new(articles)),
        Arc::new(FixedScorer(0.5)),
        sink.clone(),
    );
    (Arc::new(ctx), sink)
}

/// Collects formatted log lines emitted on the current thread
#[derive(Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Route this thread's events into the capture until the guard drops
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Captured lines logged at `level` ("ERROR", "WARN", ...)
    pub fn lines(&self, level: &str) -> Vec<String> {
        let buf = self.buf.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .filter(|line| line.trim_start().starts_with(level))
            .map(str::to_string)
            .collect()
    }
}

pub struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter(self.buf.clone())
    }
}
