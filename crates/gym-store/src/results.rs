use thiserror::Error as ThisError;

use gym_domain::Id;

/// Store errors
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum StoreError {
    #[error("No record {id} in {collection}")]
    NotFound { collection: &'static str, id: Id },
    #[error("Storage write failed: {0}")]
    Persistence(String),
    #[error("Storage quota exceeded writing '{key}' ({needed} of {quota} bytes)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
    #[error("Invalid update: {0}")]
    InvalidPatch(String),
    #[error("Date out of range")]
    DateOutOfRange,
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Persistence(err.to_string())
    }
}
