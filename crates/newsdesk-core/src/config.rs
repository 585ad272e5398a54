use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_NEWS_API_KEY: &str = "NEWS_API_KEY";
pub const ENV_DISCORD_TOKEN: &str = "DISCORD_TOKEN";
pub const ENV_DISCORD_CHANNEL_ID: &str = "DISCORD_CHANNEL_ID";
pub const ENV_INTERVAL_SECS: &str = "NEWSDESK_INTERVAL_SECS";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub publish: PublishConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Top headlines endpoint
    #[serde(default = "default_news_endpoint")]
    pub endpoint: String,
    /// NewsAPI key (usually supplied through NEWS_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Two-letter country code
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_category")]
    pub category: String,
    /// Number of headlines per batch
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_news_endpoint(),
            api_key: None,
            country: default_country(),
            category: default_category(),
            page_size: default_page_size(),
            request_timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Bot token (usually supplied through DISCORD_TOKEN)
    #[serde(default)]
    pub token: Option<String>,
    /// Destination channel id (usually supplied through DISCORD_CHANNEL_ID)
    #[serde(default)]
    pub channel_id: Option<u64>,
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
    #[serde(default = "default_command_name")]
    pub command_name: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: None,
            channel_id: None,
            command_prefix: default_command_prefix(),
            command_name: default_command_name(),
        }
    }
}

impl DiscordConfig {
    /// Full command text users type, e.g. `!news`
    pub fn command(&self) -> String {
        format!("{}{}", self.command_prefix, self.command_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Maximum summary length (chars)
    #[serde(default = "default_summary_max_length")]
    pub summary_max_length: usize,
    /// Footer text on every posted embed
    #[serde(default = "default_footer")]
    pub footer: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            summary_max_length: default_summary_max_length(),
            footer: default_footer(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Seconds between scheduled batches (0 = disabled)
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_news_endpoint() -> String {
    "https://newsapi.org/v2/top-headlines".to_string()
}

fn default_country() -> String {
    "us".to_string()
}

fn default_category() -> String {
    "general".to_string()
}

fn default_page_size() -> u32 {
    5
}

fn default_timeout() -> u64 {
    30
}

fn default_command_prefix() -> String {
    "!".to_string()
}

fn default_command_name() -> String {
    "news".to_string()
}

fn default_summary_max_length() -> usize {
    200
}

fn default_footer() -> String {
    "News Bot | Powered by NewsAPI".to_string()
}

fn default_interval() -> u64 {
    3600 // 1 hour
}

impl AppConfig {
    /// Load configuration from the default path, `.env` and the environment
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path` (defaults if it does not exist),
    /// then apply `.env` and environment overrides
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)
                .map_err(|e| crate::Error::Config(e.to_string()))?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        // A missing .env is fine; the variables may come from the process environment.
        if let Ok(dotenv_path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", dotenv_path.display());
        }

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overlay values from an environment-like lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> crate::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_NEWS_API_KEY).filter(|v| !v.trim().is_empty()) {
            self.news.api_key = Some(key.trim().to_string());
        }

        if let Some(token) = lookup(ENV_DISCORD_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.discord.token = Some(token.trim().to_string());
        }

        if let Some(raw) = lookup(ENV_DISCORD_CHANNEL_ID) {
            let id = raw.trim().parse::<u64>().map_err(|e| {
                crate::Error::Config(format!(
                    "{} must be a numeric channel id, got '{}': {}",
                    ENV_DISCORD_CHANNEL_ID, raw, e
                ))
            })?;
            self.discord.channel_id = Some(id);
        }

        if let Some(raw) = lookup(ENV_INTERVAL_SECS) {
            self.schedule.interval_secs = raw.trim().parse::<u64>().map_err(|e| {
                crate::Error::Config(format!("{} must be a number of seconds: {}", ENV_INTERVAL_SECS, e))
            })?;
        }

        Ok(())
    }

    /// Check everything the bot needs before connecting
    pub fn validate(&self) -> crate::Result<()> {
        if self.news.api_key.is_none() {
            return Err(crate::Error::Config(format!("News API key not configured (set {})", ENV_NEWS_API_KEY)));
        }
        if self.discord.token.is_none() {
            return Err(crate::Error::Config(format!("Discord token not configured (set {})", ENV_DISCORD_TOKEN)));
        }
        match self.discord.channel_id {
            None | Some(0) => {
                return Err(crate::Error::Config(format!(
                    "Discord channel id not configured (set {})",
                    ENV_DISCORD_CHANNEL_ID
                )));
            }
            Some(_) => {}
        }
        if self.news.page_size == 0 {
            return Err(crate::Error::Config("news.page_size must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Destination channel id, 0 when unset
    pub fn channel_id(&self) -> u64 {
        self.discord.channel_id.unwrap_or_default()
    }

    /// Get the configuration file path
    /// Always uses ~/.config/newsdesk/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("newsdesk")
            .join("config.toml")
    }
}
