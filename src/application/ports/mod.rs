mod dashboard_source;
mod storage_area;

pub use dashboard_source::{DashboardSource, DashboardSourceError};
pub use storage_area::{StorageArea, StorageAreaError};
