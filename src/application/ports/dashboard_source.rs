use async_trait::async_trait;

use crate::domain::Dashboard;

#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn fetch(&self) -> Result<Dashboard, DashboardSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardSourceError {
    #[error("upstream unavailable: {0}")]
    Unavailable(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
