use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the user persistence gateway.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RepositoryError {
    /// Rejected before any store interaction.
    #[error("User validation error: {0}")]
    Validation(String),
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("User store error: {0}")]
    Store(String),
}

impl From<StoreError> for RepositoryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::Closed(message) => Self::Store(message),
        }
    }
}
