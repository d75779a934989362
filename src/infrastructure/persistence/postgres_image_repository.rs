use async_trait::async_trait;
use sqlx::PgPool;

use crate::application::ports::{ImageRepository, RepositoryError};
use crate::domain::entities::ImageRecord;
use crate::domain::value_objects::{ContentType, ImageId, StorageKey, StoragePath};

pub struct PostgresImageRepository {
    pool: PgPool,
}

impl PostgresImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for PostgresImageRepository {
    async fn save(&self, record: ImageRecord) -> Result<ImageRecord, RepositoryError> {
        let byte_size = i64::try_from(record.byte_size()).map_err(|_| {
            RepositoryError::SerializationError(format!(
                "byte_size out of range: {}",
                record.byte_size()
            ))
        })?;

        let row = sqlx::query_as::<_, ImageRow>(
            r#"
            INSERT INTO image_info (id, file_name, original_file_name, file_url, file_path,
                                    file_size, content_type, upload_time, upload_ip)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, file_name, original_file_name, file_url, file_path,
                      file_size, content_type, upload_time, upload_ip
            "#,
        )
        .bind(record.id().as_uuid())
        .bind(record.storage_key().as_str())
        .bind(record.original_file_name())
        .bind(record.public_url())
        .bind(record.storage_path().as_str())
        .bind(byte_size)
        .bind(record.content_type().as_str())
        .bind(record.uploaded_at())
        .bind(record.uploader_address())
        .fetch_one(&self.pool)
        .await?;

        row.into_domain()
    }
}

// Internal row mapping struct
#[derive(sqlx::FromRow)]
struct ImageRow {
    id: uuid::Uuid,
    file_name: String,
    original_file_name: Option<String>,
    file_url: String,
    file_path: String,
    file_size: i64,
    content_type: String,
    upload_time: chrono::DateTime<chrono::Utc>,
    upload_ip: String,
}

impl ImageRow {
    fn into_domain(self) -> Result<ImageRecord, RepositoryError> {
        let content_type = ContentType::parse(Some(&self.content_type))
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        let byte_size = u64::try_from(self.file_size).map_err(|_| {
            RepositoryError::SerializationError(format!("negative file_size: {}", self.file_size))
        })?;

        Ok(ImageRecord::reconstruct(
            ImageId::from_uuid(self.id),
            StorageKey::from_string(self.file_name),
            self.original_file_name,
            self.file_url,
            StoragePath::from_string(self.file_path),
            byte_size,
            content_type,
            self.upload_time,
            self.upload_ip,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(content_type: &str, file_size: i64) -> ImageRow {
        ImageRow {
            id: uuid::Uuid::new_v4(),
            file_name: "abc.png".to_string(),
            original_file_name: Some("cat.png".to_string()),
            file_url: "http://localhost:9000/images/uploads/2024/3/abc.png".to_string(),
            file_path: "uploads/2024/3/abc.png".to_string(),
            file_size,
            content_type: content_type.to_string(),
            upload_time: Utc::now(),
            upload_ip: "1.2.3.4".to_string(),
        }
    }

    #[test]
    fn test_row_into_domain() {
        let record = row("image/png", 10).into_domain().unwrap();

        assert_eq!(record.storage_key().as_str(), "abc.png");
        assert_eq!(record.byte_size(), 10);
        assert_eq!(record.content_type().as_str(), "image/png");
        assert_eq!(record.uploader_address(), "1.2.3.4");
    }

    #[test]
    fn test_row_with_non_image_type_is_rejected() {
        let err = row("text/html", 10).into_domain().unwrap_err();
        assert!(matches!(err, RepositoryError::SerializationError(_)));
    }

    #[test]
    fn test_row_with_negative_size_is_rejected() {
        let err = row("image/png", -1).into_domain().unwrap_err();
        assert!(matches!(err, RepositoryError::SerializationError(_)));
    }
}
