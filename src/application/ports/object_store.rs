use async_trait::async_trait;
use futures_util::future::BoxFuture;
#[cfg(test)]
use mockall::{automock, predicate::*};
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Object store error: {0}")]
    Backend(String),

    #[error("Invalid storage configuration: {0}")]
    Configuration(String),
}

/// Type alias for async reader
pub type ContentReader = Pin<Box<dyn AsyncRead + Send>>;

/// Uploaded bytes that have been received but not yet read back.
///
/// Opening consumes the source, so the content can be streamed exactly once.
pub trait ContentSource: Send {
    fn open(self: Box<Self>) -> BoxFuture<'static, std::io::Result<ContentReader>>;
}

/// Port for the object storage backend
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stream `reader` to `path` in `bucket`, creating or replacing the object.
    ///
    /// `size` is the caller's declared length and is only a transfer hint.
    async fn put_object(
        &self,
        bucket: &str,
        path: &str,
        reader: ContentReader,
        size: u64,
        content_type: &str,
    ) -> Result<(), StorageError>;
}
