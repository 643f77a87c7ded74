use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::{self, BoxStream};
use futures::{StreamExt, future};

use crate::application::ports::{StorageArea, StorageAreaError};
use crate::domain::{StorageKey, UploadRequest};

/// Turns inbound upload streams into objects in a [`StorageArea`].
pub struct UploadIngestor {
    storage: Arc<dyn StorageArea>,
}

impl UploadIngestor {
    pub fn new(storage: Arc<dyn StorageArea>) -> Self {
        Self { storage }
    }

    #[tracing::instrument(
        skip(self, request),
        fields(display_name = ?request.display_name, content_length = ?request.content_length)
    )]
    pub async fn ingest(&self, request: UploadRequest<'_>) -> Result<StorageKey, IngestError> {
        let UploadRequest {
            display_name,
            content_length,
            stream,
        } = request;

        // A declared length is not trusted to be non-empty; only data is.
        let stream = match content_length {
            Some(0) => None,
            _ => peek_non_empty(stream).await?,
        };
        let Some(stream) = stream else {
            tracing::warn!("Rejecting empty upload");
            return Err(IngestError::EmptyInput);
        };

        self.storage.ensure().await.map_err(|e| {
            tracing::error!(error = %e, "Storage area could not be ensured");
            IngestError::StorageUnavailable(e)
        })?;

        let key = StorageKey::generate(&display_name);

        match self.storage.store(&key, stream, content_length).await {
            Ok(size) => {
                tracing::info!(storage_key = %key, bytes = size, "Upload stored");
                Ok(key)
            }
            Err(StorageAreaError::AlreadyExists(_)) => {
                tracing::error!(storage_key = %key, "Generated storage key already taken");
                Err(IngestError::KeyCollision(key))
            }
            Err(e @ StorageAreaError::Unavailable(_)) => {
                tracing::error!(storage_key = %key, error = %e, "Storage area rejected the object");
                Err(IngestError::StorageUnavailable(e))
            }
            Err(e) => {
                tracing::error!(storage_key = %key, error = %e, "Upload write failed");
                Err(IngestError::WriteFailed(e))
            }
        }
    }
}

/// Pulls chunks until one carries data, then stitches it back in front of
/// the remaining stream. Returns `None` when the stream holds no bytes.
async fn peek_non_empty(
    mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
) -> Result<Option<BoxStream<'_, Result<Bytes, io::Error>>>, IngestError> {
    while let Some(chunk) = stream.next().await {
        let bytes = chunk.map_err(|e| {
            tracing::error!(error = %e, "Upload stream failed before any data arrived");
            IngestError::WriteFailed(StorageAreaError::WriteFailed(e))
        })?;
        if !bytes.is_empty() {
            let head = stream::once(future::ready(Ok(bytes)));
            return Ok(Some(head.chain(stream).boxed()));
        }
    }
    Ok(None)
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("upload is empty")]
    EmptyInput,
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] StorageAreaError),
    #[error("write failed: {0}")]
    WriteFailed(#[source] StorageAreaError),
    #[error("storage key collision: {0}")]
    KeyCollision(StorageKey),
}
