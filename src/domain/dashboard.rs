use serde::{Deserialize, Serialize};

/// Dashboard document as served by the upstream reporting API.
///
/// The upstream shape is owned elsewhere, so the document is carried as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dashboard(serde_json::Value);

impl Dashboard {
    pub fn new(document: serde_json::Value) -> Self {
        Self(document)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_json(self) -> serde_json::Value {
        self.0
    }
}
