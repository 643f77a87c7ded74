use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::application::ports::{StorageArea, StorageAreaError};
use crate::domain::StorageKey;

/// Default size of a single write to disk (64 KiB).
pub const DEFAULT_WRITE_CHUNK_BYTES: usize = 64 * 1024;

/// Storage area backed by a directory on the local filesystem.
///
/// The directory is not touched at construction; it is created lazily by
/// [`StorageArea::ensure`].
pub struct LocalStorageArea {
    root: PathBuf,
    write_chunk_bytes: usize,
}

impl LocalStorageArea {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_write_chunk_bytes(root, DEFAULT_WRITE_CHUNK_BYTES)
    }

    pub fn with_write_chunk_bytes(root: impl Into<PathBuf>, write_chunk_bytes: usize) -> Self {
        Self {
            root: root.into(),
            write_chunk_bytes: write_chunk_bytes.max(1),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn object_path(&self, key: &StorageKey) -> PathBuf {
        self.root.join(key.as_str())
    }

    async fn copy_into(
        &self,
        file: fs::File,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, io::Error> {
        let mut writer = BufWriter::with_capacity(self.write_chunk_bytes, file);
        let mut total_bytes: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let bytes = chunk?;
            for piece in bytes.chunks(self.write_chunk_bytes) {
                writer.write_all(piece).await?;
            }
            total_bytes += bytes.len() as u64;
        }

        writer.flush().await?;
        writer.into_inner().sync_all().await?;
        Ok(total_bytes)
    }
}

#[async_trait::async_trait]
impl StorageArea for LocalStorageArea {
    async fn ensure(&self) -> Result<(), StorageAreaError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(StorageAreaError::Unavailable)
    }

    #[tracing::instrument(skip(self, key, stream), fields(backend = "filesystem", key = %key))]
    async fn store(
        &self,
        key: &StorageKey,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
        content_length: Option<u64>,
    ) -> Result<u64, StorageAreaError> {
        let path = self.object_path(key);

        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => StorageAreaError::AlreadyExists(key.to_string()),
                _ => StorageAreaError::Unavailable(e),
            })?;

        // Removes the object unless defused below; also fires when this
        // future is dropped mid-copy. Drop cannot await, so the removal is a
        // blocking call on the worker thread.
        let partial = scopeguard::guard(path, |path| {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove partial object");
            } else {
                tracing::debug!(path = %path.display(), "Removed partial object");
            }
        });

        let total_bytes = self
            .copy_into(file, stream)
            .await
            .map_err(StorageAreaError::WriteFailed)?;

        if let Some(expected) = content_length
            && expected != total_bytes
        {
            return Err(StorageAreaError::WriteFailed(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("declared {expected} bytes but received {total_bytes}"),
            )));
        }

        scopeguard::ScopeGuard::into_inner(partial);
        Ok(total_bytes)
    }

    async fn fetch(&self, key: &StorageKey) -> Result<Vec<u8>, StorageAreaError> {
        fs::read(self.object_path(key)).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StorageAreaError::NotFound(key.to_string()),
            _ => StorageAreaError::ReadFailed(e),
        })
    }

    async fn head(&self, key: &StorageKey) -> Result<u64, StorageAreaError> {
        let meta = fs::metadata(self.object_path(key))
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => StorageAreaError::NotFound(key.to_string()),
                _ => StorageAreaError::ReadFailed(e),
            })?;
        Ok(meta.len())
    }

    async fn delete(&self, key: &StorageKey) -> Result<(), StorageAreaError> {
        fs::remove_file(self.object_path(key))
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => StorageAreaError::NotFound(key.to_string()),
                _ => StorageAreaError::DeleteFailed(e),
            })
    }
}
