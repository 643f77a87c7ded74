mod local_store;

pub use local_store::{DEFAULT_WRITE_CHUNK_BYTES, LocalStorageArea};
