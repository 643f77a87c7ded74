use std::sync::Arc;

use crate::application::ports::DashboardSource;
use crate::application::services::UploadIngestor;

#[derive(Clone)]
pub struct AppState {
    pub upload_ingestor: Arc<UploadIngestor>,
    pub dashboard_source: Arc<dyn DashboardSource>,
    pub max_upload_bytes: usize,
}
