//! Site settings.
//!
//! The backend owns the settings schema; the client treats it as a
//! free-form string-keyed map.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Client for the admin settings endpoints.
#[derive(Debug, Clone)]
pub struct SettingsApi {
    client: Arc<ApiClient>,
}

impl SettingsApi {
    /// Creates the client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetches all settings.
    pub async fn all(&self) -> Result<Map<String, Value>, ApiError> {
        self.client.get("admin/settings", &[]).await
    }

    /// Updates settings; only the supplied keys change.
    pub async fn update(&self, settings: &Map<String, Value>) -> Result<Map<String, Value>, ApiError> {
        self.client.put_json("admin/settings", settings).await
    }

    /// Resets all settings to their defaults.
    pub async fn reset(&self) -> Result<Map<String, Value>, ApiError> {
        self.client.post_empty("admin/settings/reset").await
    }
}
