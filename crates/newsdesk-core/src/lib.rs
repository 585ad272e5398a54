pub mod analysis;
pub mod chat;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod news;
pub mod publish;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testing;

pub use config::AppConfig;
pub use context::AppContext;
pub use error::{Error, Result};
pub use publish::{send_news_update, BatchOutcome};
