use thiserror::Error;

pub type Result<T> = std::result::Result<T, RedditalyzerError>;

#[derive(Error, Debug)]
pub enum RedditalyzerError {
    #[error("Request failed (status {status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("{0} could not be found")]
    IdentityNotFound(String),

    #[error("{identity} has an incomplete profile (missing {field})")]
    IncompleteProfile { identity: String, field: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RedditalyzerError {
    /// Per-identity resolution failures. The run skips the identity and continues.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            RedditalyzerError::IdentityNotFound(_) | RedditalyzerError::IncompleteProfile { .. }
        )
    }
}

impl From<serde_json::Error> for RedditalyzerError {
    fn from(err: serde_json::Error) -> Self {
        RedditalyzerError::Parse(err.to_string())
    }
}
