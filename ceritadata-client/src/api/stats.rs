//! Dashboard and usage statistics.

use std::sync::Arc;

use ceritadata_core::{DashboardStats, PopularStory, StoryStats, UsageStats};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Default usage-stats period.
const DEFAULT_PERIOD: &str = "30d";

/// Default popular-stories limit.
const DEFAULT_LIMIT: u32 = 10;

/// Client for the admin statistics endpoints.
#[derive(Debug, Clone)]
pub struct StatsApi {
    client: Arc<ApiClient>,
}

impl StatsApi {
    /// Creates the client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetches the dashboard aggregates.
    pub async fn dashboard(&self) -> Result<DashboardStats, ApiError> {
        self.client.get("admin/stats/dashboard", &[]).await
    }

    /// Fetches statistics for one story.
    pub async fn story(&self, id: u64) -> Result<StoryStats, ApiError> {
        self.client.get(&format!("admin/stats/story/{id}"), &[]).await
    }

    /// Fetches site usage for a period (`30d` by default).
    pub async fn usage(&self, period: Option<&str>) -> Result<UsageStats, ApiError> {
        let period = period.unwrap_or(DEFAULT_PERIOD).to_string();
        self.client
            .get("admin/stats/usage", &[("period", period)])
            .await
    }

    /// Fetches the most-viewed stories.
    pub async fn popular(&self, limit: Option<u32>) -> Result<Vec<PopularStory>, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).to_string();
        self.client
            .get("admin/stats/popular", &[("limit", limit)])
            .await
    }
}
