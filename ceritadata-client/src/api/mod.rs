//! Typed resource clients.
//!
//! Each resource (public story reading, admin story CRUD, file upload,
//! stats, users, settings, auth, export) gets a thin client that builds
//! paths, queries, and bodies and delegates to [`ApiClient`]. The
//! [`Api`] facade bundles them over one shared client.

pub mod admin;
pub mod auth;
pub mod export;
pub mod files;
pub mod settings;
pub mod stats;
pub mod stories;
pub mod users;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::session::SessionStore;

pub use admin::{AdminStoryApi, AdminStoryQuery};
pub use auth::{AuthApi, AuthSession};
pub use export::{ExportApi, ImportSummary};
pub use files::{FileApi, FileInfo, UploadResponse};
pub use settings::SettingsApi;
pub use stats::StatsApi;
pub use stories::{StoryApi, StoryListQuery};
pub use users::{UserApi, UserUpdate};

// ============================================================================
// Pagination Envelope
// ============================================================================

/// The backend's pagination envelope for list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// The page of items.
    pub data: Vec<T>,
    /// 1-based current page.
    #[serde(default = "default_page")]
    pub current_page: u32,
    /// Last available page.
    #[serde(default = "default_page")]
    pub last_page: u32,
    /// Total items across all pages.
    #[serde(default)]
    pub total: u64,
}

fn default_page() -> u32 {
    1
}

impl<T> Paginated<T> {
    /// True if a page follows the current one.
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.last_page
    }
}

// ============================================================================
// Facade
// ============================================================================

/// Bundles every resource client over one shared [`ApiClient`].
#[derive(Debug, Clone)]
pub struct Api {
    client: Arc<ApiClient>,
}

impl Api {
    /// Creates the facade for a backend base URL and session.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::new`].
    pub fn new(base_url: &str, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        Ok(Self {
            client: Arc::new(ApiClient::new(base_url, session)?),
        })
    }

    /// Wraps an existing client.
    pub fn from_client(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// The shared HTTP client.
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Authentication operations.
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(Arc::clone(&self.client))
    }

    /// Public story reading.
    pub fn stories(&self) -> StoryApi {
        StoryApi::new(Arc::clone(&self.client))
    }

    /// Admin story CRUD and workflow.
    pub fn admin_stories(&self) -> AdminStoryApi {
        AdminStoryApi::new(Arc::clone(&self.client))
    }

    /// File uploads and management.
    pub fn files(&self) -> FileApi {
        FileApi::new(Arc::clone(&self.client))
    }

    /// Dashboard and usage statistics.
    pub fn stats(&self) -> StatsApi {
        StatsApi::new(Arc::clone(&self.client))
    }

    /// User management.
    pub fn users(&self) -> UserApi {
        UserApi::new(Arc::clone(&self.client))
    }

    /// Site settings.
    pub fn settings(&self) -> SettingsApi {
        SettingsApi::new(Arc::clone(&self.client))
    }

    /// Story export and import.
    pub fn export(&self) -> ExportApi {
        ExportApi::new(Arc::clone(&self.client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paginated_parses_envelope() {
        let page: Paginated<u32> = serde_json::from_value(json!({
            "data": [1, 2, 3],
            "current_page": 1,
            "last_page": 2,
            "total": 5
        }))
        .unwrap();
        assert_eq!(page.data.len(), 3);
        assert!(page.has_next_page());
    }

    #[test]
    fn paginated_defaults_for_unpaged_response() {
        let page: Paginated<u32> =
            serde_json::from_value(json!({ "data": [1] })).unwrap();
        assert_eq!(page.current_page, 1);
        assert!(!page.has_next_page());
    }
}
