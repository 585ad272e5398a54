use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("News API error: {0}")]
    NewsApi(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Chat error: {0}")]
    Chat(String),
}

impl From<serenity::Error> for Error {
    fn from(err: serenity::Error) -> Self {
        Error::Chat(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
