//! Storage trait definitions

use crate::chart::{MedicalChart, UserId};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for chart storage backends
///
/// A store is a durable map from user id to the complete chart. `save`
/// replaces whatever was stored under the id. Callers that need
/// read-modify-write atomicity serialize per id themselves (see
/// `ChartService`).
///
/// Implementations must be thread-safe (Send + Sync).
pub trait ChartStore: Send + Sync {
    /// Load a chart by user id
    fn load(&self, id: &UserId) -> StorageResult<Option<MedicalChart>>;

    /// Save a chart (insert or replace)
    fn save(&self, id: &UserId, chart: &MedicalChart) -> StorageResult<()>;

    /// Delete a chart, returning whether one existed
    fn delete(&self, id: &UserId) -> StorageResult<bool>;

    /// List all stored user ids
    fn list(&self) -> StorageResult<Vec<UserId>>;

    /// Check whether a chart exists
    fn contains(&self, id: &UserId) -> StorageResult<bool> {
        Ok(self.load(id)?.is_some())
    }
}
