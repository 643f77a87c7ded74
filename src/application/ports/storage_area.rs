use std::io;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::StorageKey;

/// Root location that uploaded objects are written under.
///
/// `store` must never overwrite an existing object and must leave nothing
/// behind when it fails or is cancelled part way through.
#[async_trait::async_trait]
pub trait StorageArea: Send + Sync {
    /// Creates the area if it is missing. Safe to call concurrently.
    async fn ensure(&self) -> Result<(), StorageAreaError>;

    async fn store(
        &self,
        key: &StorageKey,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
        content_length: Option<u64>,
    ) -> Result<u64, StorageAreaError>;

    async fn fetch(&self, key: &StorageKey) -> Result<Vec<u8>, StorageAreaError>;

    async fn head(&self, key: &StorageKey) -> Result<u64, StorageAreaError>;

    async fn delete(&self, key: &StorageKey) -> Result<(), StorageAreaError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageAreaError {
    #[error("storage area unavailable: {0}")]
    Unavailable(#[source] io::Error),
    #[error("object already exists: {0}")]
    AlreadyExists(String),
    #[error("write failed: {0}")]
    WriteFailed(#[source] io::Error),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(#[source] io::Error),
    #[error("delete failed: {0}")]
    DeleteFailed(#[source] io::Error),
}
