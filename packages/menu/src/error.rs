use common::document::DocumentError;
use common::storage::StorageError;
use thiserror::Error;

use crate::draft::Field;
use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Unsupported image type: {0} (expected PNG or JPEG)")]
    UnsupportedType(String),

    #[error("Image file is empty")]
    Empty,
}

/// Client-side validation failures. Nothing has been sent to a backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{0} is required")]
    Required(Field),

    #[error("Price must contain digits only")]
    InvalidPrice,

    #[error("Category '{0}' is not a valid category name")]
    InvalidCategory(String),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] DraftError),

    #[error("A submission is already in progress")]
    InFlight,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Image upload failed: {0}")]
    Upload(StorageError),

    #[error("Failed to save menu: {0}")]
    Persistence(#[from] DocumentError),
}

impl SubmitError {
    /// Whether the failure happened before any backend call.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            SubmitError::Invalid(_) | SubmitError::InFlight | SubmitError::Session(_)
        )
    }
}
