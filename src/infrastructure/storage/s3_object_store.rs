use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::debug;

use crate::application::ports::{ContentReader, ObjectStore, StorageError};

/// Connection settings for an S3-compatible backend such as MinIO
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    /// MinIO needs path-style addressing (`endpoint/bucket/key`)
    pub path_style: bool,
}

/// Object store talking to S3/MinIO over HTTP
pub struct S3ObjectStore {
    region: Region,
    credentials: Credentials,
    path_style: bool,
}

impl S3ObjectStore {
    pub fn new(settings: S3Settings) -> Result<Self, StorageError> {
        let credentials = Credentials::new(
            Some(settings.access_key.as_str()),
            Some(settings.secret_key.as_str()),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Configuration(e.to_string()))?;

        let region = Region::Custom {
            region: settings.region,
            endpoint: settings.endpoint,
        };

        Ok(Self {
            region,
            credentials,
            path_style: settings.path_style,
        })
    }

    /// Bucket handles are cheap and hold no connection, so one is built per call
    fn bucket(&self, name: &str) -> Result<Box<Bucket>, StorageError> {
        let bucket = Bucket::new(name, self.region.clone(), self.credentials.clone())
            .map_err(|e| StorageError::Configuration(e.to_string()))?;

        Ok(if self.path_style {
            bucket.with_path_style()
        } else {
            bucket
        })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        path: &str,
        mut reader: ContentReader,
        size: u64,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let bucket = self.bucket(bucket)?;

        debug!(
            bucket = %bucket.name(),
            path,
            declared_size = size,
            content_type,
            "Streaming object to S3"
        );

        bucket
            .put_object_stream_with_content_type(&mut reader, path, content_type)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(())
    }
}
