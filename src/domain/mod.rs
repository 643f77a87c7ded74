mod dashboard;
mod storage_key;
mod upload_request;

pub use dashboard::Dashboard;
pub use storage_key::{StorageKey, sanitize_display_name};
pub use upload_request::UploadRequest;
