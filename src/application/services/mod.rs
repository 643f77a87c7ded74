mod upload_ingestor;

pub use upload_ingestor::{IngestError, UploadIngestor};
