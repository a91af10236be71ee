//! Admin story CRUD, the approval workflow, and bulk operations.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use ceritadata_core::{ActivityLog, Story, StoryStatus};

use crate::api::Paginated;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::multipart::StorySubmission;

// ============================================================================
// Listing Query
// ============================================================================

/// Filters and pagination for the admin story listing.
#[derive(Debug, Clone, Default)]
pub struct AdminStoryQuery {
    /// Status tab filter.
    pub status: Option<StoryStatus>,
    /// Free-text search term.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

impl AdminStoryQuery {
    /// Flattens into query pairs, skipping unset filters.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.wire_name().to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        pairs
    }
}

#[derive(Serialize)]
struct IdList<'a> {
    ids: &'a [u64],
}

#[derive(Serialize)]
struct RejectRequest<'a> {
    reason: &'a str,
}

#[derive(Serialize)]
struct ApproveRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
}

// ============================================================================
// Admin Story Api
// ============================================================================

/// Client for the admin story endpoints.
#[derive(Debug, Clone)]
pub struct AdminStoryApi {
    client: Arc<ApiClient>,
}

impl AdminStoryApi {
    /// Creates the client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Lists stories with admin filters.
    pub async fn list(&self, query: &AdminStoryQuery) -> Result<Paginated<Story>, ApiError> {
        self.client.get("admin/stories", &query.to_query()).await
    }

    /// Fetches one story by id.
    pub async fn get(&self, id: u64) -> Result<Story, ApiError> {
        self.client.get(&format!("admin/stories/{id}"), &[]).await
    }

    /// Creates a story from an editor submission.
    pub async fn create(&self, submission: StorySubmission) -> Result<Story, ApiError> {
        let form = submission.into_form(false)?;
        let story: Story = self.client.post_multipart("admin/stories", form).await?;
        info!(id = story.id, "Story created");
        Ok(story)
    }

    /// Updates a story from an editor submission.
    ///
    /// Sent as a multipart POST with the `_method=PUT` override marker,
    /// the form the backend contract expects for updates with
    /// attachments.
    pub async fn update(&self, id: u64, submission: StorySubmission) -> Result<Story, ApiError> {
        let form = submission.into_form(true)?;
        let story: Story = self
            .client
            .post_multipart(&format!("admin/stories/{id}"), form)
            .await?;
        info!(id, "Story updated");
        Ok(story)
    }

    /// Deletes a story.
    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.client.delete(&format!("admin/stories/{id}"), &[]).await
    }

    /// Moves a draft into the approval queue.
    pub async fn submit_for_approval(&self, id: u64) -> Result<(), ApiError> {
        let _: Value = self
            .client
            .post_empty(&format!("admin/stories/{id}/submit-approval"))
            .await?;
        Ok(())
    }

    /// Approves a pending story, publishing it. Approver role only.
    pub async fn approve(&self, id: u64, note: Option<&str>) -> Result<(), ApiError> {
        let _: Value = self
            .client
            .post_json(&format!("admin/stories/{id}/approve"), &ApproveRequest { note })
            .await?;
        Ok(())
    }

    /// Rejects a pending story back to draft. Approver role only.
    pub async fn reject(&self, id: u64, reason: &str) -> Result<(), ApiError> {
        let _: Value = self
            .client
            .post_json(&format!("admin/stories/{id}/reject"), &RejectRequest { reason })
            .await?;
        Ok(())
    }

    /// Fetches the activity log, optionally for one story.
    pub async fn activity_logs(&self, story_id: Option<u64>) -> Result<Vec<ActivityLog>, ApiError> {
        let query: Vec<(&str, String)> = story_id
            .map(|id| vec![("story_id", id.to_string())])
            .unwrap_or_default();
        self.client.get("admin/activity-logs", &query).await
    }

    /// Deletes several stories in one request. The backend owns whatever
    /// all-or-nothing semantics apply.
    pub async fn bulk_delete(&self, ids: &[u64]) -> Result<(), ApiError> {
        let _: Value = self
            .client
            .post_json("admin/stories/bulk-delete", &IdList { ids })
            .await?;
        info!(count = ids.len(), "Bulk delete issued");
        Ok(())
    }

    /// Approves several stories in one request.
    pub async fn bulk_approve(&self, ids: &[u64]) -> Result<(), ApiError> {
        let _: Value = self
            .client
            .post_json("admin/stories/bulk-approve", &IdList { ids })
            .await?;
        info!(count = ids.len(), "Bulk approve issued");
        Ok(())
    }

    /// Clones a story into a new draft.
    pub async fn clone_story(&self, id: u64) -> Result<Story, ApiError> {
        self.client
            .post_empty(&format!("admin/stories/{id}/clone"))
            .await
    }
}

// ============================================================================
// Tests
// ============================================================================
