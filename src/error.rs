use std::fmt;

/// Ошибки, которые доходят до границы обработчиков
#[derive(Debug)]
pub enum BotError {
    StoreUnavailable(String),
    ModelUnavailable(String),
    ModelError(String),
    ConfigurationMissing(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::StoreUnavailable(e) => write!(f, "Store unavailable: {}", e),
            BotError::ModelUnavailable(e) => write!(f, "Model unavailable: {}", e),
            BotError::ModelError(e) => write!(f, "Model error: {}", e),
            BotError::ConfigurationMissing(key) => {
                write!(f, "Missing required configuration: {}", key)
            }
        }
    }
}

impl std::error::Error for BotError {}

impl From<sqlx::Error> for BotError {
    fn from(err: sqlx::Error) -> Self {
        BotError::StoreUnavailable(err.to_string())
    }
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        BotError::ModelUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(err: serde_json::Error) -> Self {
        BotError::ModelError(err.to_string())
    }
}
