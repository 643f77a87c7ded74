use std::fmt;
use std::io;

use bytes::Bytes;
use futures::stream::BoxStream;

/// A client upload as handed over by the boundary layer.
///
/// The display name is untrusted and advisory. `content_length` is the
/// declared size when the boundary knows it; the stream is authoritative.
/// A stream that yields no bytes is empty even when a length was declared.
pub struct UploadRequest<'a> {
    pub display_name: String,
    pub content_length: Option<u64>,
    pub stream: BoxStream<'a, Result<Bytes, io::Error>>,
}

impl<'a> UploadRequest<'a> {
    pub fn new(
        display_name: impl Into<String>,
        content_length: Option<u64>,
        stream: BoxStream<'a, Result<Bytes, io::Error>>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            content_length,
            stream,
        }
    }
}

impl fmt::Debug for UploadRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadRequest")
            .field("display_name", &self.display_name)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}
