use thiserror::Error;

/// Errors that can occur during file intake
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Too many files in one selection: {count} (limit is {limit})")]
    TooManyFiles { count: usize, limit: usize },

    #[error("Error uploading file: {message}")]
    Upload { message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to read dropped entry: {message}")]
    Traversal { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for intake operations
pub type Result<T> = std::result::Result<T, IngestError>;
