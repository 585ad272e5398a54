use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use crate::context::AppContext;
use crate::publish::{send_news_update, BatchOutcome};
use crate::Result;

/// Events emitted by the scheduler after each scheduled batch
#[derive(Debug, Clone)]
pub enum SchedulerEvent {
    /// A batch finished without a send error
    BatchFinished { outcome: BatchOutcome },
    /// A batch failed part-way through
    Error { task: String, message: String },
}

/// Periodic news updates, cancellable through a shutdown channel
pub struct SchedulerService {
    ctx: Arc<AppContext>,
    interval_secs: u64,
    event_tx: Option<mpsc::UnboundedSender<SchedulerEvent>>,
}

impl SchedulerService {
    /// Create a new scheduler using the configured interval
    pub fn new(ctx: Arc<AppContext>) -> Self {
        let interval_secs = ctx.config().schedule.interval_secs;
        Self {
            ctx,
            interval_secs,
            event_tx: None,
        }
    }

    /// Set the event sender for batch notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<SchedulerEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    fn send_event(&self, event: SchedulerEvent) {
        if let Some(ref tx) = self.event_tx {
            if tx.send(event).is_err() {
                warn!("Failed to send scheduler event: receiver dropped");
            }
        }
    }

    /// Run a single batch now
    pub async fn tick(&self) -> Result<BatchOutcome> {
        debug!("Running scheduled news update");

        let result = send_news_update(&self.ctx).await;
        match &result {
            Ok(outcome) => {
                info!("Scheduled news update: {}", outcome);
                self.send_event(SchedulerEvent::BatchFinished { outcome: *outcome });
            }
            Err(e) => {
                error!("Scheduled news update failed: {}", e);
                self.send_event(SchedulerEvent::Error {
                    task: "news_update".to_string(),
                    message: e.to_string(),
                });
            }
        }
        result
    }

    /// Run a batch immediately, then once per interval, until shutdown.
    ///
    /// The wait starts after each batch completes. A batch in flight is allowed
    /// to finish before shutdown is observed.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        if self.interval_secs == 0 {
            info!("News scheduler disabled (interval_secs = 0)");
            // Still wait for shutdown
            while !*shutdown.borrow() {
                if shutdown.changed().await.is_err() {
                    break;
                }
            }
            return;
        }

        let interval = Duration::from_secs(self.interval_secs);
        info!("News scheduler started: interval={}s", self.interval_secs);

        loop {
            if *shutdown.borrow() {
                break;
            }

            // Errors are logged and reported as events; the next run still happens
            let _ = self.tick().await;

            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Scheduler received shutdown signal");
                        break;
                    }
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }

        info!("News scheduler stopped");
    }
}
