use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tokio::sync::watch;
use tracing::{debug, error, info};

use newsdesk_core::{
    commands::{is_news_command, run_news_command},
    scheduler::SchedulerService,
    AppContext,
};

/// Client data slot holding the shared application context
pub struct AppKey;

impl TypeMapKey for AppKey {
    type Value = Arc<AppContext>;
}

async fn app_context(ctx: &Context) -> Option<Arc<AppContext>> {
    let app = ctx.data.read().await.get::<AppKey>().cloned();
    if app.is_none() {
        error!("Application context missing from client data");
    }
    app
}

/// Gateway event handler: starts the timer on first ready and answers the news command
pub struct Handler {
    shutdown: watch::Receiver<bool>,
    scheduler_started: AtomicBool,
}

impl Handler {
    pub fn new(shutdown: watch::Receiver<bool>) -> Self {
        Self {
            shutdown,
            scheduler_started: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Bot connected as {}", ready.user.name);

        // Gateway reconnects fire ready again
        if self.scheduler_started.swap(true, Ordering::SeqCst) {
            debug!("Scheduler already running, ignoring repeated ready");
            return;
        }

        let Some(app) = app_context(&ctx).await else {
            return;
        };

        let scheduler = SchedulerService::new(app);
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            scheduler.run(shutdown).await;
        });
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(app) = app_context(&ctx).await else {
            return;
        };
        if !is_news_command(&msg.content, &app.config().discord) {
            return;
        }

        info!("News command from {} in channel {}", msg.author.name, msg.channel_id);

        let reply = run_news_command(&app).await;
        if let Err(e) = msg.channel_id.say(&ctx.http, reply).await {
            error!("Failed to reply to news command: {}", e);
        }
    }
}
