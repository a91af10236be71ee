//! Admin dashboard statistics.

use serde::{Deserialize, Serialize};

/// Aggregate counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Total number of stories.
    pub total_stories: u64,
    /// Stories currently published.
    pub published_stories: u64,
    /// Stories in draft.
    pub draft_stories: u64,
    /// Stories waiting for approval.
    pub review_stories: u64,
    /// Total page views across all stories.
    #[serde(default)]
    pub total_views: u64,
}

/// Per-story statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryStats {
    /// Story identifier.
    pub story_id: u64,
    /// Page views.
    pub views: u64,
    /// Data table downloads.
    #[serde(default)]
    pub downloads: u64,
}

/// Site usage over a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageStats {
    /// Period the numbers cover, e.g. `30d`.
    pub period: String,
    /// Page views in the period.
    pub views: u64,
    /// Unique visitors in the period.
    #[serde(default)]
    pub visitors: u64,
}

/// A story ranked by popularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularStory {
    /// Story identifier.
    pub id: u64,
    /// Story title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Page views.
    pub views: u64,
}
