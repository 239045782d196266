use thiserror::Error;

pub type Result<T> = std::result::Result<T, PushshiftError>;

#[derive(Debug, Error)]
pub enum PushshiftError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request couldn't be processed (status {status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Key {0} not found in data")]
    MissingField(&'static str),
}

impl From<reqwest::Error> for PushshiftError {
    fn from(err: reqwest::Error) -> Self {
        PushshiftError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for PushshiftError {
    fn from(err: serde_json::Error) -> Self {
        PushshiftError::Parse(err.to_string())
    }
}
