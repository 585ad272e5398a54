use std::sync::Arc;

use anyhow::Result;
use serenity::model::gateway::GatewayIntents;
use serenity::Client;
use tokio::sync::watch;
use tracing::info;

use newsdesk_core::{chat::DiscordSink, AppConfig, AppContext};

use crate::bot::{AppKey, Handler};

/// Connect to Discord and serve until Ctrl+C
pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    config.validate()?;

    let token = config.discord.token.clone().unwrap_or_default();

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&token, intents)
        .event_handler(Handler::new(shutdown_rx))
        .await?;

    // Headline posts share the client's HTTP handle and its rate limiter
    let sink = Arc::new(DiscordSink::new(client.http.clone()));
    let app = Arc::new(AppContext::from_config(config.clone(), sink)?);
    client.data.write().await.insert::<AppKey>(app);

    // Setup signal handler for graceful shutdown
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        let _ = shutdown_tx.send(true);
        shard_manager.shutdown_all().await;
    });

    println!("Starting newsdesk. Press Ctrl+C to stop.");
    println!("  Channel: {}", config.channel_id());
    println!("  Command: {}", config.discord.command());
    if config.schedule.interval_secs == 0 {
        println!("  Scheduled updates: disabled");
    } else {
        println!("  Update interval: {} seconds", config.schedule.interval_secs);
    }

    client.start().await?;

    println!("newsdesk stopped.");

    Ok(())
}
