use thiserror::Error;

/// Errors raised across the acquisition and persistence pipeline.
#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("Failed to connect to acquisition source: {0}")]
    Connection(String),

    #[error("Session method called in invalid state: {0}")]
    State(String),

    #[error("Stream control failed: {0}")]
    Stream(String),

    #[error("Failed to load config: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ExperimentError>;
