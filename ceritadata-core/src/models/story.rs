//! The story aggregate and its parts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::status::StoryStatus;
use super::table::DataTableConfig;
use crate::models::chart::ChartType;

// ============================================================================
// Story
// ============================================================================

/// A data story as the backend returns it.
///
/// The backend owns this record; the client holds a working copy while
/// editing. `chart_config` and `chart_data` stay opaque here and are
/// parsed into typed chart structures by the editor when hydrating a
/// draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    /// Backend identifier.
    pub id: u64,
    /// URL-safe unique slug.
    pub slug: String,
    /// Story title.
    pub title: String,
    /// Short description shown in listings.
    pub description: String,
    /// Narrative body (rich text markup).
    pub story_content: String,
    /// Chart type for the story's chart.
    pub chart_type: ChartType,
    /// Renderer-shaped chart configuration blob.
    #[serde(default)]
    pub chart_config: Option<Value>,
    /// Renderer-shaped chart data blob.
    #[serde(default)]
    pub chart_data: Option<Value>,
    /// Data table display configuration.
    #[serde(default)]
    pub data_table_config: Option<DataTableConfig>,
    /// Storage path of the featured image, if set.
    #[serde(default)]
    pub featured_image: Option<String>,
    /// Storage path of the uploaded data source file, if set.
    #[serde(default)]
    pub data_file_path: Option<String>,
    /// Publication status.
    #[serde(default)]
    pub status: StoryStatus,
    /// Supporting images, in display order.
    #[serde(default)]
    pub images: Vec<StoryImage>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A supporting image attached to a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryImage {
    /// Backend identifier.
    pub id: u64,
    /// Storage path of the image file.
    pub image_path: String,
    /// Caption shown under the image. Empty means no caption.
    #[serde(default)]
    pub caption: String,
}

// ============================================================================
// Activity Log
// ============================================================================

/// An entry in the admin activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    /// Backend identifier.
    pub id: u64,
    /// Story this entry refers to, if any.
    #[serde(default)]
    pub story_id: Option<u64>,
    /// Name of the user who performed the action.
    pub user_name: String,
    /// Action performed (created, updated, approved, ...).
    pub action: String,
    /// When the action happened.
    pub created_at: DateTime<Utc>,
}
