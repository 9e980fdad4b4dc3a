use thiserror::Error;

pub type VenueResult<T> = Result<T, VenueError>;

#[derive(Error, Debug)]
pub enum VenueError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Invalid RFM code: {0}")]
    InvalidRfm(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
