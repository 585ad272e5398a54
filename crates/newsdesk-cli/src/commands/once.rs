use std::sync::Arc;

use anyhow::Result;

use newsdesk_core::{chat::DiscordSink, send_news_update, AppConfig, AppContext};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    config.validate()?;

    println!("Posting headlines to channel {}...\n", config.channel_id());

    let token = config.discord.token.clone().unwrap_or_default();
    let sink = Arc::new(DiscordSink::with_token(&token));
    let ctx = AppContext::from_config(config, sink)?;
    let outcome = send_news_update(&ctx).await?;

    println!("News update finished: {}.", outcome);

    Ok(())
}
