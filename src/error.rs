use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing API keys: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Search API error: {0}")]
    SearchApi(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Research topic must not be empty")]
    EmptyTopic,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;
