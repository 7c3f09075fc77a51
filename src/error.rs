use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlueIrisError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Command '{verb}' failed: {reason}")]
    CommandFailure { verb: String, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Stale data: {0}")]
    StaleData(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for BlueIrisError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return BlueIrisError::Transport(format!("request timed out: {}", e));
        }
        BlueIrisError::Transport(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BlueIrisError>;
