use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid document path: {0}")]
    InvalidPath(String),

    #[error("Field '{field}' is not an array")]
    NotAnArray { field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Backend(String),
}
