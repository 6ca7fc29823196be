use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrepdeckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PrepdeckError>;
