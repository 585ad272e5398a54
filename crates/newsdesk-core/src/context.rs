use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::analysis::{SentimentScorer, Vader};
use crate::chat::ChatSink;
use crate::config::AppConfig;
use crate::news::{HeadlineSource, NewsFetcher};
use crate::Result;

/// Everything a batch needs, built once at startup and shared by both triggers
pub struct AppContext {
    config: Arc<AppConfig>,
    source: Arc<dyn HeadlineSource>,
    scorer: Arc<dyn SentimentScorer>,
    chat: Arc<dyn ChatSink>,
    batch_lock: Mutex<()>,
}

impl AppContext {
    pub fn new(
        config: Arc<AppConfig>,
        source: Arc<dyn HeadlineSource>,
        scorer: Arc<dyn SentimentScorer>,
        chat: Arc<dyn ChatSink>,
    ) -> Self {
        Self {
            config,
            source,
            scorer,
            chat,
            batch_lock: Mutex::new(()),
        }
    }

    /// Wire up NewsAPI and VADER from configuration, posting through `chat`
    pub fn from_config(config: Arc<AppConfig>, chat: Arc<dyn ChatSink>) -> Result<Self> {
        let fetcher = NewsFetcher::new(&config)?;

        Ok(Self::new(config, Arc::new(fetcher), Arc::new(Vader::new()), chat))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn source(&self) -> &dyn HeadlineSource {
        self.source.as_ref()
    }

    pub fn scorer(&self) -> &dyn SentimentScorer {
        self.scorer.as_ref()
    }

    pub fn chat(&self) -> &dyn ChatSink {
        self.chat.as_ref()
    }

    /// Claim the batch slot; `None` while another batch is in flight
    pub(crate) fn try_begin_batch(&self) -> Option<MutexGuard<'_, ()>> {
        self.batch_lock.try_lock().ok()
    }
}
