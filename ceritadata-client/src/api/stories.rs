//! Public story reading.

use std::sync::Arc;

use ceritadata_core::{Story, TableData};

use crate::api::Paginated;
use crate::error::ApiError;
use crate::http::ApiClient;

// ============================================================================
// Listing Query
// ============================================================================

/// Filters and pagination for the public story listing.
#[derive(Debug, Clone, Default)]
pub struct StoryListQuery {
    /// Free-text search term.
    pub search: Option<String>,
    /// Category filter.
    pub category: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

impl StoryListQuery {
    /// Flattens into query pairs, skipping unset filters.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        pairs
    }

    /// A stable cache key for this query, for use with
    /// [`crate::ResponseCache`].
    pub fn cache_key(&self) -> String {
        let pairs = self.to_query();
        if pairs.is_empty() {
            return "stories:list".to_string();
        }
        let suffix = pairs
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("stories:list:{suffix}")
    }
}

// ============================================================================
// Story Api
// ============================================================================

/// Client for the public story endpoints.
#[derive(Debug, Clone)]
pub struct StoryApi {
    client: Arc<ApiClient>,
}

impl StoryApi {
    /// Creates the client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Lists published stories.
    pub async fn list(&self, query: &StoryListQuery) -> Result<Paginated<Story>, ApiError> {
        self.client.get("stories", &query.to_query()).await
    }

    /// Fetches one story by slug.
    pub async fn by_slug(&self, slug: &str) -> Result<Story, ApiError> {
        self.client.get(&format!("stories/{slug}"), &[]).await
    }

    /// Fetches the story's data table.
    pub async fn data_table(&self, slug: &str) -> Result<TableData, ApiError> {
        self.client.get(&format!("stories/{slug}/data"), &[]).await
    }

    /// Full-text search.
    pub async fn search(&self, term: &str) -> Result<Vec<Story>, ApiError> {
        self.client
            .get("stories/search", &[("q", term.to_string())])
            .await
    }

    /// Lists available categories.
    pub async fn categories(&self) -> Result<Vec<String>, ApiError> {
        self.client.get("stories/categories", &[]).await
    }

    /// Lists featured stories.
    pub async fn featured(&self) -> Result<Vec<Story>, ApiError> {
        self.client.get("stories/featured", &[]).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_has_no_pairs() {
        assert!(StoryListQuery::default().to_query().is_empty());
        assert_eq!(StoryListQuery::default().cache_key(), "stories:list");
    }

    #[test]
    fn query_pairs_skip_unset_filters() {
        let query = StoryListQuery {
            search: Some("tpt".to_string()),
            page: Some(2),
            ..Default::default()
        };
        assert_eq!(
            query.to_query(),
            vec![("search", "tpt".to_string()), ("page", "2".to_string())]
        );
        assert_eq!(query.cache_key(), "stories:list:search=tpt&page=2");
    }
}
