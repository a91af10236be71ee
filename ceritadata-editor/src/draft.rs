//! The editor draft: a mutable working copy of one story.
//!
//! A draft starts empty (create mode) or hydrated from a fetched
//! [`Story`] (edit mode). Field edits mutate it in place; chart label
//! and value edits arrive as comma-separated text the way the form
//! collects them. [`EditorDraft::build_submission`] validates and then
//! freezes the draft into a [`StorySubmission`] for the wire.
//!
//! Captions live in one map keyed by [`CaptionKey`], so an existing
//! image and a staged upload can never collide even when their numeric
//! ids overlap.

use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

use ceritadata_client::{ExistingImage, FilePart, StorySubmission};
use ceritadata_core::{
    ChartConfig, ChartData, ChartType, CoreError, DataTableConfig, Story, StoryImage, StoryStatus,
};

use crate::attachments::{self, AttachmentError};
use crate::validate::{validate, DraftIssue};

// ============================================================================
// Errors
// ============================================================================

/// Error type for editor operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// An attachment failed its client-side checks.
    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    /// The draft has a blocking validation issue.
    #[error("{0}")]
    Invalid(DraftIssue),

    /// A stored chart blob could not be hydrated.
    #[error(transparent)]
    Hydrate(#[from] CoreError),

    /// A structured field failed to encode.
    #[error("Failed to encode draft field: {0}")]
    Encode(#[from] serde_json::Error),
}

// ============================================================================
// Mode and Caption Keys
// ============================================================================

/// Whether the draft creates a new story or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Creating a new story.
    Create,
    /// Editing the story with this backend id.
    Edit(u64),
}

/// Key for an image caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptionKey {
    /// An image already stored on the backend, by its id.
    Existing(u64),
    /// A staged upload, by its position in the staging list.
    New(usize),
}

// ============================================================================
// Editor Draft
// ============================================================================

/// The mutable working copy of a story under edit.
#[derive(Debug, Clone)]
pub struct EditorDraft {
    mode: EditorMode,

    /// Story title.
    pub title: String,
    /// Short description shown in listings.
    pub description: String,
    /// Narrative body (rich text markup).
    pub story_content: String,
    /// Chart title and render options.
    pub chart_config: ChartConfig,
    /// Chart labels and data series.
    pub chart_data: ChartData,
    /// Data table display configuration.
    pub data_table_config: DataTableConfig,
    /// Current publication status (read-only context for edits).
    pub status: StoryStatus,
    /// Storage path of the currently stored featured image.
    pub featured_image_path: Option<String>,
    /// Storage path of the currently stored data source file.
    pub data_file_path: Option<String>,

    chart_type: ChartType,
    existing_images: Vec<StoryImage>,
    new_images: Vec<FilePart>,
    captions: HashMap<CaptionKey, String>,
    featured_image: Option<FilePart>,
    data_file: Option<FilePart>,
}

impl EditorDraft {
    /// Creates an empty draft in create mode with the default chart
    /// setup (line chart, one dataset labeled "Data").
    pub fn new() -> Self {
        Self {
            mode: EditorMode::Create,
            title: String::new(),
            description: String::new(),
            story_content: String::new(),
            chart_config: ChartConfig::default(),
            chart_data: ChartData::new(),
            data_table_config: DataTableConfig::default(),
            status: StoryStatus::Draft,
            featured_image_path: None,
            data_file_path: None,
            chart_type: ChartType::default(),
            existing_images: Vec::new(),
            new_images: Vec::new(),
            captions: HashMap::new(),
            featured_image: None,
            data_file: None,
        }
    }

    /// Hydrates an edit-mode draft from a fetched story.
    ///
    /// Stored chart blobs are parsed into typed chart structures; a
    /// missing blob falls back to the same defaults a fresh draft has.
    /// Existing image captions seed the caption map.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidData`] if a stored chart data blob
    /// is not an object.
    pub fn from_story(story: &Story) -> Result<Self, CoreError> {
        let chart_data = match &story.chart_data {
            Some(blob) => ChartData::from_payload(blob)?,
            None => ChartData::new(),
        };
        let chart_config = story
            .chart_config
            .as_ref()
            .map(ChartConfig::from_payload)
            .unwrap_or_default();
        let captions = story
            .images
            .iter()
            .map(|image| (CaptionKey::Existing(image.id), image.caption.clone()))
            .collect();

        Ok(Self {
            mode: EditorMode::Edit(story.id),
            title: story.title.clone(),
            description: story.description.clone(),
            story_content: story.story_content.clone(),
            chart_config,
            chart_data,
            data_table_config: story.data_table_config.clone().unwrap_or_default(),
            status: story.status,
            featured_image_path: story.featured_image.clone(),
            data_file_path: story.data_file_path.clone(),
            chart_type: story.chart_type,
            existing_images: story.images.clone(),
            new_images: Vec::new(),
            captions,
            featured_image: None,
            data_file: None,
        })
    }

    /// Returns the draft's mode.
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// True when editing an existing story.
    pub fn is_edit(&self) -> bool {
        matches!(self.mode, EditorMode::Edit(_))
    }

    // ------------------------------------------------------------------------
    // Text fields
    // ------------------------------------------------------------------------

    /// Title length in characters, for the form's counter.
    pub fn title_chars(&self) -> usize {
        self.title.chars().count()
    }

    /// Description length in characters, for the form's counter.
    pub fn description_chars(&self) -> usize {
        self.description.chars().count()
    }

    // ------------------------------------------------------------------------
    // Chart fields
    // ------------------------------------------------------------------------

    /// Returns the current chart type.
    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    /// Switches the chart type and re-derives the primary dataset's
    /// presentation style. Labels and data values are untouched.
    pub fn set_chart_type(&mut self, kind: ChartType) {
        self.chart_type = kind;
        self.chart_data.primary_mut().restyle_for(kind);
    }

    /// Sets the chart title.
    pub fn set_chart_title(&mut self, title: impl Into<String>) {
        self.chart_config.title = title.into();
    }

    /// Sets the primary dataset's legend label.
    pub fn set_dataset_label(&mut self, label: impl Into<String>) {
        self.chart_data.primary_mut().label = label.into();
    }

    /// Replaces the chart labels from comma-separated text. Tokens are
    /// trimmed; empty tokens are dropped.
    pub fn set_labels_csv(&mut self, text: &str) {
        self.chart_data.labels = text
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(ToString::to_string)
            .collect();
    }

    /// Replaces the primary dataset's values from comma-separated text.
    ///
    /// Every token yields a value: anything that does not parse as a
    /// number becomes `0.0`, so a typo never shifts the values out of
    /// alignment with the labels.
    pub fn set_data_values_csv(&mut self, text: &str) {
        self.chart_data.primary_mut().data = text
            .split(',')
            .map(str::trim)
            .map(|token| {
                token.parse::<f64>().unwrap_or_else(|_| {
                    warn!(token, "non-numeric chart value coerced to 0");
                    0.0
                })
            })
            .collect();
    }

    // ------------------------------------------------------------------------
    // Attachments
    // ------------------------------------------------------------------------

    /// Stages a new featured image, replacing any previously staged one.
    ///
    /// # Errors
    ///
    /// Rejects files that are not JPEG/PNG or exceed 2 MB.
    pub fn set_featured_image(&mut self, part: FilePart) -> Result<(), EditorError> {
        attachments::validate_image(&part)?;
        self.featured_image = Some(part);
        Ok(())
    }

    /// Drops the staged featured image, keeping the stored one.
    pub fn clear_featured_image(&mut self) {
        self.featured_image = None;
    }

    /// Stages a new tabular data source file.
    ///
    /// # Errors
    ///
    /// Rejects files that are not XLSX/XLS or exceed 10 MB.
    pub fn set_data_file(&mut self, part: FilePart) -> Result<(), EditorError> {
        attachments::validate_data_file(&part)?;
        self.data_file = Some(part);
        Ok(())
    }

    /// Drops the staged data source file.
    pub fn clear_data_file(&mut self) {
        self.data_file = None;
    }

    /// Appends supporting images to the pending-upload list, seeding a
    /// blank caption slot for each. All files are checked before any is
    /// staged.
    ///
    /// # Errors
    ///
    /// Rejects the whole batch if any file is not JPEG/PNG or exceeds
    /// 2 MB.
    pub fn stage_new_images(&mut self, parts: Vec<FilePart>) -> Result<(), EditorError> {
        for part in &parts {
            attachments::validate_image(part)?;
        }
        for part in parts {
            let index = self.new_images.len();
            self.new_images.push(part);
            self.captions.entry(CaptionKey::New(index)).or_default();
        }
        Ok(())
    }

    /// Existing backend images still attached to the draft.
    pub fn existing_images(&self) -> &[StoryImage] {
        &self.existing_images
    }

    /// Staged uploads, in staging order.
    pub fn staged_images(&self) -> &[FilePart] {
        &self.new_images
    }

    /// Removes one existing image and only that image's caption. Other
    /// captions, staged uploads, and the rest of the draft are
    /// untouched.
    pub fn remove_existing_image(&mut self, id: u64) {
        self.existing_images.retain(|image| image.id != id);
        self.captions.remove(&CaptionKey::Existing(id));
    }

    /// Sets the caption for one image.
    pub fn set_caption(&mut self, key: CaptionKey, text: impl Into<String>) {
        self.captions.insert(key, text.into());
    }

    /// Returns the caption for one image, if it has a slot.
    pub fn caption(&self, key: CaptionKey) -> Option<&str> {
        self.captions.get(&key).map(String::as_str)
    }

    // ------------------------------------------------------------------------
    // Validation and submission
    // ------------------------------------------------------------------------

    /// Returns the first blocking issue, or `None` when submittable.
    pub fn validate(&self) -> Option<DraftIssue> {
        validate(self)
    }

    /// Freezes the draft into a wire submission.
    ///
    /// Chart config and data are resolved into their renderer-shaped
    /// blobs here; in edit mode the surviving existing images travel
    /// with their current captions so the backend can reconcile
    /// deletions and caption edits.
    ///
    /// # Errors
    ///
    /// Fails fast with [`EditorError::Invalid`] while a validation
    /// issue remains.
    pub fn build_submission(&self) -> Result<StorySubmission, EditorError> {
        if let Some(issue) = self.validate() {
            return Err(EditorError::Invalid(issue));
        }

        let existing_images = match self.mode {
            EditorMode::Create => None,
            EditorMode::Edit(_) => Some(
                self.existing_images
                    .iter()
                    .map(|image| ExistingImage {
                        id: image.id,
                        caption: self
                            .captions
                            .get(&CaptionKey::Existing(image.id))
                            .cloned()
                            .unwrap_or_else(|| image.caption.clone()),
                    })
                    .collect(),
            ),
        };

        let images = self
            .new_images
            .iter()
            .enumerate()
            .map(|(index, file)| {
                let caption = self
                    .captions
                    .get(&CaptionKey::New(index))
                    .cloned()
                    .unwrap_or_default();
                (file.clone(), caption)
            })
            .collect();

        Ok(StorySubmission {
            title: self.title.clone(),
            description: self.description.clone(),
            story_content: self.story_content.clone(),
            chart_type: self.chart_type,
            chart_config: self.chart_config.to_payload(self.chart_type),
            chart_data: self.chart_data.to_payload(),
            data_table_config: serde_json::to_value(&self.data_table_config)?,
            featured_image: self.featured_image.clone(),
            data_file: self.data_file.clone(),
            images,
            existing_images,
        })
    }
}

impl Default for EditorDraft {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    use ceritadata_core::DatasetStyle;

    fn filled_draft() -> EditorDraft {
        let mut draft = EditorDraft::new();
        draft.title = "Tren TPT".to_string();
        draft.description = "Tingkat pengangguran terbuka".to_string();
        draft.story_content = "<p>Menurun sejak 2022.</p>".to_string();
        draft.set_labels_csv("2022, 2023, 2024");
        draft.set_data_values_csv("5.8, 5.3, 4.9");
        draft
    }

    fn stored_story() -> Story {
        Story {
            id: 7,
            slug: "tren-tpt".to_string(),
            title: "Tren TPT".to_string(),
            description: "Deskripsi".to_string(),
            story_content: "<p>Isi</p>".to_string(),
            chart_type: ChartType::Bar,
            chart_config: Some(json!({ "title": "TPT per tahun" })),
            chart_data: Some(json!({
                "labels": ["2022", "2023"],
                "datasets": [{ "label": "TPT", "data": [5.8, 5.3] }],
            })),
            data_table_config: None,
            featured_image: Some("stories/cover.jpg".to_string()),
            data_file_path: None,
            status: StoryStatus::Draft,
            images: vec![
                StoryImage {
                    id: 31,
                    image_path: "stories/a.jpg".to_string(),
                    caption: "Pabrik".to_string(),
                },
                StoryImage {
                    id: 32,
                    image_path: "stories/b.jpg".to_string(),
                    caption: String::new(),
                },
            ],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn image(name: &str) -> FilePart {
        FilePart::new(name, "image/jpeg", vec![0; 16])
    }

    #[test]
    fn new_draft_defaults() {
        let draft = EditorDraft::new();
        assert_eq!(draft.mode(), EditorMode::Create);
        assert_eq!(draft.chart_type(), ChartType::Line);
        assert_eq!(draft.chart_data.primary().unwrap().label, "Data");
        assert_eq!(draft.data_table_config.title, "Data Tabel");
        assert!(draft.data_table_config.show_download);
    }

    #[test]
    fn values_csv_coerces_bad_tokens_to_zero() {
        let mut draft = EditorDraft::new();
        draft.set_data_values_csv("5.5, abc, 3");
        assert_eq!(draft.chart_data.primary().unwrap().data, vec![5.5, 0.0, 3.0]);
    }

    #[test]
    fn labels_csv_trims_and_drops_empty_tokens() {
        let mut draft = EditorDraft::new();
        draft.set_labels_csv(" 2022 ,, 2023 ");
        assert_eq!(draft.chart_data.labels, vec!["2022", "2023"]);
    }

    #[test]
    fn chart_type_switch_restyles_but_keeps_data() {
        let mut draft = filled_draft();
        let labels = draft.chart_data.labels.clone();
        let data = draft.chart_data.primary().unwrap().data.clone();

        draft.set_chart_type(ChartType::Pie);
        assert!(matches!(
            draft.chart_data.primary().unwrap().style,
            DatasetStyle::Slices { .. }
        ));

        draft.set_chart_type(ChartType::Line);
        assert_eq!(draft.chart_data.labels, labels);
        assert_eq!(draft.chart_data.primary().unwrap().data, data);
        assert!(matches!(
            draft.chart_data.primary().unwrap().style,
            DatasetStyle::Stroke { .. }
        ));
    }

    #[test]
    fn hydration_parses_stored_blobs_and_captions() {
        let draft = EditorDraft::from_story(&stored_story()).unwrap();
        assert_eq!(draft.mode(), EditorMode::Edit(7));
        assert_eq!(draft.chart_type(), ChartType::Bar);
        assert_eq!(draft.chart_config.title, "TPT per tahun");
        assert_eq!(draft.chart_data.labels, vec!["2022", "2023"]);
        assert_eq!(draft.caption(CaptionKey::Existing(31)), Some("Pabrik"));
        assert_eq!(draft.caption(CaptionKey::Existing(32)), Some(""));
        assert_eq!(draft.data_table_config, DataTableConfig::default());
    }

    #[test]
    fn staging_images_seeds_blank_caption_slots() {
        let mut draft = EditorDraft::new();
        draft
            .stage_new_images(vec![image("a.jpg"), image("b.jpg")])
            .unwrap();
        assert_eq!(draft.staged_images().len(), 2);
        assert_eq!(draft.caption(CaptionKey::New(0)), Some(""));
        assert_eq!(draft.caption(CaptionKey::New(1)), Some(""));

        draft.set_caption(CaptionKey::New(0), "Grafik");
        draft.stage_new_images(vec![image("c.jpg")]).unwrap();
        assert_eq!(draft.caption(CaptionKey::New(0)), Some("Grafik"));
        assert_eq!(draft.caption(CaptionKey::New(2)), Some(""));
    }

    #[test]
    fn staging_rejects_the_whole_batch_on_one_bad_file() {
        let mut draft = EditorDraft::new();
        let result = draft.stage_new_images(vec![image("ok.jpg"), image("bad.gif")]);
        assert!(result.is_err());
        assert!(draft.staged_images().is_empty());
    }

    #[test]
    fn removing_an_existing_image_touches_nothing_else() {
        let mut draft = EditorDraft::from_story(&stored_story()).unwrap();
        draft.set_caption(CaptionKey::Existing(32), "Kantor");
        draft.stage_new_images(vec![image("new.jpg")]).unwrap();

        draft.remove_existing_image(31);

        assert_eq!(draft.existing_images().len(), 1);
        assert_eq!(draft.existing_images()[0].id, 32);
        assert_eq!(draft.caption(CaptionKey::Existing(31)), None);
        assert_eq!(draft.caption(CaptionKey::Existing(32)), Some("Kantor"));
        assert_eq!(draft.staged_images().len(), 1);
        assert_eq!(draft.caption(CaptionKey::New(0)), Some(""));
    }

    #[test]
    fn build_submission_fails_fast_on_validation() {
        let mut draft = filled_draft();
        draft.set_data_values_csv("1, 2");

        match draft.build_submission() {
            Err(EditorError::Invalid(issue)) => {
                assert_eq!(issue, DraftIssue::LengthMismatch);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn create_submission_has_no_existing_images() {
        let submission = filled_draft().build_submission().unwrap();
        assert!(submission.existing_images.is_none());
        assert_eq!(submission.chart_type, ChartType::Line);
        assert_eq!(submission.chart_data["labels"][0], "2022");
        assert_eq!(
            submission.chart_config["options"]["scales"]["y"]["beginAtZero"],
            true
        );
        assert_eq!(submission.data_table_config["showDownload"], true);
    }

    #[test]
    fn edit_submission_carries_survivors_with_edited_captions() {
        let mut draft = EditorDraft::from_story(&stored_story()).unwrap();
        draft.set_caption(CaptionKey::Existing(32), "Kantor");
        draft.remove_existing_image(31);
        draft.stage_new_images(vec![image("new.jpg")]).unwrap();
        draft.set_caption(CaptionKey::New(0), "Baru");

        let submission = draft.build_submission().unwrap();
        let existing = submission.existing_images.as_ref().unwrap();
        assert_eq!(existing.len(), 1);
        assert_eq!(existing[0].id, 32);
        assert_eq!(existing[0].caption, "Kantor");
        assert_eq!(submission.images.len(), 1);
        assert_eq!(submission.images[0].1, "Baru");
    }

    #[test]
    fn character_counters_count_chars_not_bytes() {
        let mut draft = EditorDraft::new();
        draft.title = "tingkat pengangguran — kota".to_string();
        assert_eq!(draft.title_chars(), draft.title.chars().count());
    }
}
