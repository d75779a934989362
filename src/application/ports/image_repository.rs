use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::ImageRecord;
#[cfg(test)]
use mockall::{automock, predicate::*};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Port for image metadata persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Persist the record and return it as stored
    async fn save(&self, record: ImageRecord) -> Result<ImageRecord, RepositoryError>;
}
