use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{DashboardSource, DashboardSourceError};
use crate::domain::Dashboard;

/// Fetches the dashboard document from the upstream reporting API.
pub struct HttpDashboardClient {
    client: Client,
    url: String,
}

impl HttpDashboardClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl DashboardSource for HttpDashboardClient {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Dashboard, DashboardSourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DashboardSourceError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardSourceError::Unavailable(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let document: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DashboardSourceError::InvalidResponse(e.to_string()))?;

        Ok(Dashboard::new(document))
    }
}
