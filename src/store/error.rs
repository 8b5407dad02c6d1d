use thiserror::Error;

/// Errors reported by the document store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Store communication error: {0}")]
    Closed(String),
}
