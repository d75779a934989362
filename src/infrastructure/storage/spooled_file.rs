use bytes::Bytes;
use futures_util::future::BoxFuture;
use futures_util::{Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};
use tempfile::TempPath;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncWriteExt, BufWriter, ReadBuf};
use tracing::debug;

use crate::application::ports::{ContentReader, ContentSource};

#[derive(Debug, Error)]
pub enum SpoolError {
    /// The incoming body could not be read
    #[error("Failed to read file chunk: {0}")]
    Read(String),

    /// The temp file could not be created or written
    #[error("Failed to buffer upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Upload body parked in a temp file until it is streamed to the object store.
///
/// The file is removed when the value, or the reader opened from it, is dropped.
pub struct SpooledFile {
    path: TempPath,
    size: u64,
}

impl SpooledFile {
    /// Drain `chunks` into a fresh temp file.
    ///
    /// Stops reading as soon as more than `limit` bytes have arrived; the
    /// returned size is then larger than `limit` but not the full body length.
    pub async fn spool<S, E>(chunks: S, limit: u64) -> Result<Self, SpoolError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: std::fmt::Display,
    {
        let named = tokio::task::spawn_blocking(|| {
            tempfile::Builder::new().prefix("upload-").tempfile()
        })
        .await
        .map_err(std::io::Error::other)??;
        let (file, path) = named.into_parts();
        let mut writer = BufWriter::new(File::from_std(file));

        let mut chunks = std::pin::pin!(chunks);
        let mut size = 0u64;
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(|e| SpoolError::Read(e.to_string()))?;
            writer.write_all(&chunk).await?;
            size += chunk.len() as u64;

            if size > limit {
                debug!(size, limit, "Upload exceeds size limit, stopped reading");
                break;
            }
        }
        writer.flush().await?;

        Ok(Self { path, size })
    }

    /// Number of bytes spooled
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl ContentSource for SpooledFile {
    fn open(self: Box<Self>) -> BoxFuture<'static, std::io::Result<ContentReader>> {
        Box::pin(async move {
            let file = File::open(&self.path).await?;
            let reader: ContentReader = Box::pin(SpooledReader {
                file,
                _path: self.path,
            });
            Ok(reader)
        })
    }
}

/// Keeps the temp path alive until reading is finished
struct SpooledReader {
    file: File,
    _path: TempPath,
}

impl AsyncRead for SpooledReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        Pin::new(&mut self.file).poll_read(cx, buf)
    }
}
