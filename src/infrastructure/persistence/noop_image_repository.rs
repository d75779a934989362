use async_trait::async_trait;

use crate::application::ports::{ImageRepository, RepositoryError};
use crate::domain::entities::ImageRecord;

/// Metadata store that keeps nothing and hands the record straight back
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopImageRepository;

impl NoopImageRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageRepository for NoopImageRepository {
    async fn save(&self, record: ImageRecord) -> Result<ImageRecord, RepositoryError> {
        Ok(record)
    }
}
