use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt, BufWriter};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::ports::{ContentReader, ObjectStore, StorageError};
use crate::infrastructure::storage::PathBuilder;

/// Buffer size for streaming copies
const BUFFER_SIZE: usize = 256 * 1024;

/// Object store backed by a local directory: `<root>/<bucket>/<key>`.
///
/// Writes land in a temp file first and are renamed into place, so readers
/// never observe a partially written object.
pub struct LocalFilesystemStore {
    path_builder: PathBuilder,
    durable_writes: bool,
}

impl LocalFilesystemStore {
    pub fn new(root: PathBuf) -> Self {
        Self::with_durability(root, true)
    }

    pub fn with_durability(root: PathBuf, durable_writes: bool) -> Self {
        Self {
            path_builder: PathBuilder::new(root),
            durable_writes,
        }
    }

    /// Initialize storage directories
    pub async fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.path_builder.root()).await?;
        fs::create_dir_all(self.path_builder.temp_dir()).await?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        self.path_builder.root()
    }

    async fn write_temp(
        &self,
        dest: &Path,
        mut reader: impl AsyncRead + Unpin,
    ) -> Result<u64, StorageError> {
        let mut file = BufWriter::with_capacity(BUFFER_SIZE, File::create(dest).await?);
        let mut buffer = vec![0u8; BUFFER_SIZE];
        let mut total_bytes = 0u64;

        loop {
            let n = reader.read(&mut buffer).await?;
            if n == 0 {
                break;
            }
            file.write_all(&buffer[..n]).await?;
            total_bytes += n as u64;
        }

        file.flush().await?;
        if self.durable_writes {
            file.get_mut().sync_all().await?;
        }

        Ok(total_bytes)
    }

    async fn sync_parent(&self, path: &Path) {
        let Some(parent) = path.parent() else {
            return;
        };
        match File::open(parent).await {
            Ok(dir) => {
                if let Err(e) = dir.sync_all().await {
                    warn!("Failed to sync parent directory after rename: {}", e);
                }
            }
            Err(e) => warn!("Failed to open parent directory for sync: {}", e),
        }
    }
}

#[async_trait]
impl ObjectStore for LocalFilesystemStore {
    async fn put_object(
        &self,
        bucket: &str,
        path: &str,
        reader: ContentReader,
        size: u64,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let final_path = self
            .path_builder
            .object_path(bucket, path)
            .ok_or_else(|| StorageError::Backend(format!("Invalid object path: {}/{}", bucket, path)))?;
        let temp_path = self.path_builder.temp_path(Uuid::new_v4());

        debug!(?temp_path, declared_size = size, content_type, "Writing object to temp file");
        let written = match self.write_temp(&temp_path, reader).await {
            Ok(n) => n,
            Err(e) => {
                warn!("Failed to write object to temp file {:?}: {}", temp_path, e);
                let _ = fs::remove_file(&temp_path).await;
                return Err(e);
            }
        };
        if written != size {
            debug!(written, declared_size = size, "Object length differs from declared size");
        }

        if let Some(parent) = final_path.parent() {
            if let Err(e) = fs::create_dir_all(parent).await {
                let _ = fs::remove_file(&temp_path).await;
                return Err(StorageError::Io(e));
            }
        }

        // Atomic rename, replacing any existing object
        debug!("Moving object to final location: {:?}", final_path);
        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::Io(e));
        }

        if self.durable_writes {
            self.sync_parent(&final_path).await;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn reader(data: &'static [u8]) -> ContentReader {
        Box::pin(std::io::Cursor::new(data))
    }

    #[tokio::test]
    async fn test_store_init_creates_directories() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("store");

        let store = LocalFilesystemStore::new(root.clone());
        store.init().await.unwrap();

        assert!(root.exists());
        assert!(root.join(".tmp").exists());
    }

    #[tokio::test]
    async fn test_put_object_writes_under_bucket() {
        let dir = TempDir::new().unwrap();
        let store = LocalFilesystemStore::new(dir.path().to_path_buf());
        store.init().await.unwrap();

        let content = b"Hello, World!";
        store
            .put_object(
                "images",
                "uploads/2024/3/a.png",
                reader(content),
                content.len() as u64,
                "image/png",
            )
            .await
            .unwrap();

        let stored = std::fs::read(dir.path().join("images/uploads/2024/3/a.png")).unwrap();
        assert_eq!(stored, content);
    }

    #[tokio::test]
    async fn test_put_object_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let store = LocalFilesystemStore::with_durability(dir.path().to_path_buf(), false);
        store.init().await.unwrap();

        store
            .put_object("b", "k.png", reader(b"first"), 5, "image/png")
            .await
            .unwrap();
        store
            .put_object("b", "k.png", reader(b"second"), 6, "image/png")
            .await
            .unwrap();

        assert_eq!(std::fs::read(dir.path().join("b/k.png")).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_put_object_rejects_escaping_path() {
        let dir = TempDir::new().unwrap();
        let store = LocalFilesystemStore::new(dir.path().join("root"));
        store.init().await.unwrap();

        let err = store
            .put_object("images", "uploads/x./../../../../evil", reader(b"x"), 1, "image/png")
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Backend(_)));
        assert!(!dir.path().join("evil").exists());
    }

    #[tokio::test]
    async fn test_failed_read_leaves_no_temp_file() {
        struct BrokenReader;

        impl AsyncRead for BrokenReader {
            fn poll_read(
                self: std::pin::Pin<&mut Self>,
                _cx: &mut std::task::Context<'_>,
                _buf: &mut tokio::io::ReadBuf<'_>,
            ) -> std::task::Poll<std::io::Result<()>> {
                std::task::Poll::Ready(Err(std::io::Error::other("client went away")))
            }
        }

        let dir = TempDir::new().unwrap();
        let store = LocalFilesystemStore::new(dir.path().to_path_buf());
        store.init().await.unwrap();

        let err = store
            .put_object("images", "k.png", Box::pin(BrokenReader), 10, "image/png")
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Io(_)));
        assert_eq!(std::fs::read_dir(dir.path().join(".tmp")).unwrap().count(), 0);
        assert!(!dir.path().join("images/k.png").exists());
    }
}
