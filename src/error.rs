use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("provider API error: {message}")]
    Provider { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty price series: {0}")]
    EmptySeries(&'static str),

    #[error("portfolio replay error: {0}")]
    Portfolio(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
