//! Multipart encoding of a story submission.
//!
//! Story create/update carries both text fields and binary attachments,
//! so it travels as multipart form data instead of JSON. The three
//! structured fields (`chart_config`, `chart_data`,
//! `data_table_config`) are JSON-encoded as opaque strings inside the
//! form. Updates go out as a POST with a `_method=PUT` override marker,
//! which is the form the backend contract was written against.

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

use ceritadata_core::ChartType;

use crate::error::ApiError;

// ============================================================================
// File Part
// ============================================================================

/// A file attachment: name, MIME type, and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Original file name, kept for the backend's storage naming.
    pub file_name: String,
    /// MIME type sent with the part.
    pub mime: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Creates a file part.
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Size of the file in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    fn into_part(self) -> Result<Part, ApiError> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)
            .map_err(|e| ApiError::Unexpected(format!("Invalid MIME type: {e}")))
    }
}

// ============================================================================
// Existing Image Reconciliation
// ============================================================================

/// An existing image surviving an edit, with its (possibly edited)
/// caption. The backend reconciles deletions and caption edits against
/// this list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExistingImage {
    /// Backend image identifier.
    pub id: u64,
    /// Caption to keep for this image.
    pub caption: String,
}

// ============================================================================
// Story Submission
// ============================================================================

/// One field of the multipart submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionField {
    /// A plain text field.
    Text(String),
    /// A binary file field.
    File(FilePart),
}

/// Everything the editor sends when saving a story.
#[derive(Debug, Clone)]
pub struct StorySubmission {
    /// Story title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Narrative body.
    pub story_content: String,
    /// Chart type.
    pub chart_type: ChartType,
    /// Resolved chart configuration blob.
    pub chart_config: Value,
    /// Resolved chart data blob.
    pub chart_data: Value,
    /// Resolved table configuration blob.
    pub data_table_config: Value,
    /// Newly chosen featured image, if any.
    pub featured_image: Option<FilePart>,
    /// Newly chosen data source file, if any.
    pub data_file: Option<FilePart>,
    /// Staged new images with their captions, in display order.
    pub images: Vec<(FilePart, String)>,
    /// Surviving existing images. `Some` only in edit mode.
    pub existing_images: Option<Vec<ExistingImage>>,
}

impl StorySubmission {
    /// Flattens into ordered form fields.
    ///
    /// `method_override` adds the `_method=PUT` marker used by updates.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unexpected`] if a structured field fails to
    /// encode.
    pub fn into_fields(
        self,
        method_override: bool,
    ) -> Result<Vec<(String, SubmissionField)>, ApiError> {
        let mut fields = vec![
            text("title", self.title),
            text("description", self.description),
            text("story_content", self.story_content),
            text("chart_type", self.chart_type.wire_name()),
            text("chart_config", encode_json(&self.chart_config)?),
            text("chart_data", encode_json(&self.chart_data)?),
            text("data_table_config", encode_json(&self.data_table_config)?),
        ];

        if let Some(image) = self.featured_image {
            fields.push(("featured_image".to_string(), SubmissionField::File(image)));
        }
        if let Some(file) = self.data_file {
            fields.push(("data_file".to_string(), SubmissionField::File(file)));
        }

        for (index, (image, caption)) in self.images.into_iter().enumerate() {
            fields.push((format!("images[{index}]"), SubmissionField::File(image)));
            fields.push(text(&format!("image_captions[{index}]"), caption));
        }

        if let Some(existing) = self.existing_images {
            fields.push(text("existing_images", encode_json(&existing)?));
        }

        if method_override {
            fields.push(text("_method", "PUT"));
        }

        Ok(fields)
    }

    /// Builds the multipart form.
    ///
    /// # Errors
    ///
    /// See [`StorySubmission::into_fields`].
    pub fn into_form(self, method_override: bool) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (name, field) in self.into_fields(method_override)? {
            form = match field {
                SubmissionField::Text(value) => form.text(name, value),
                SubmissionField::File(file) => form.part(name, file.into_part()?),
            };
        }
        Ok(form)
    }
}

fn text(name: &str, value: impl Into<String>) -> (String, SubmissionField) {
    (name.to_string(), SubmissionField::Text(value.into()))
}

fn encode_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value)
        .map_err(|e| ApiError::Unexpected(format!("Failed to encode submission field: {e}")))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission() -> StorySubmission {
        StorySubmission {
            title: "Tren TPT".to_string(),
            description: "Deskripsi".to_string(),
            story_content: "<p>Isi</p>".to_string(),
            chart_type: ChartType::Line,
            chart_config: json!({ "title": "TPT" }),
            chart_data: json!({ "labels": ["a"], "datasets": [] }),
            data_table_config: json!({ "title": "Data Tabel", "showDownload": true }),
            featured_image: None,
            data_file: None,
            images: Vec::new(),
            existing_images: None,
        }
    }

    fn names(fields: &[(String, SubmissionField)]) -> Vec<&str> {
        fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    #[test]
    fn create_fields_in_contract_order() {
        let fields = submission().into_fields(false).unwrap();
        assert_eq!(
            names(&fields),
            vec![
                "title",
                "description",
                "story_content",
                "chart_type",
                "chart_config",
                "chart_data",
                "data_table_config",
            ]
        );
        assert!(matches!(
            &fields[3].1,
            SubmissionField::Text(v) if v == "line"
        ));
    }

    #[test]
    fn structured_fields_are_opaque_json_strings() {
        let fields = submission().into_fields(false).unwrap();
        let SubmissionField::Text(config) = &fields[4].1 else {
            panic!("chart_config must be text");
        };
        let parsed: Value = serde_json::from_str(config).unwrap();
        assert_eq!(parsed["title"], "TPT");
    }

    #[test]
    fn staged_images_use_positional_keys_with_captions() {
        let mut sub = submission();
        sub.images = vec![
            (FilePart::new("a.jpg", "image/jpeg", vec![1]), "first".to_string()),
            (FilePart::new("b.png", "image/png", vec![2]), String::new()),
        ];

        let fields = sub.into_fields(false).unwrap();
        let tail = &fields[fields.len() - 4..];
        assert_eq!(
            names(tail),
            vec!["images[0]", "image_captions[0]", "images[1]", "image_captions[1]"]
        );
        assert!(matches!(&tail[1].1, SubmissionField::Text(v) if v == "first"));
        assert!(matches!(&tail[3].1, SubmissionField::Text(v) if v.is_empty()));
    }

    #[test]
    fn edit_mode_appends_existing_images_and_override() {
        let mut sub = submission();
        sub.existing_images = Some(vec![ExistingImage {
            id: 31,
            caption: "Pabrik".to_string(),
        }]);

        let fields = sub.into_fields(true).unwrap();
        let last_two = &fields[fields.len() - 2..];
        assert_eq!(names(last_two), vec!["existing_images", "_method"]);

        let SubmissionField::Text(existing) = &last_two[0].1 else {
            panic!("existing_images must be text");
        };
        let parsed: Value = serde_json::from_str(existing).unwrap();
        assert_eq!(parsed[0]["id"], 31);
        assert_eq!(parsed[0]["caption"], "Pabrik");
        assert!(matches!(&last_two[1].1, SubmissionField::Text(v) if v == "PUT"));
    }

    #[test]
    fn create_mode_has_no_override_marker() {
        let fields = submission().into_fields(false).unwrap();
        assert!(!names(&fields).contains(&"_method"));
    }

    #[test]
    fn attachments_slot_between_config_and_images() {
        let mut sub = submission();
        sub.featured_image = Some(FilePart::new("cover.jpg", "image/jpeg", vec![0; 4]));
        sub.data_file = Some(FilePart::new("data.xlsx", "application/vnd.ms-excel", vec![0; 8]));

        let fields = sub.into_fields(false).unwrap();
        assert_eq!(fields[7].0, "featured_image");
        assert_eq!(fields[8].0, "data_file");
        assert!(matches!(
            &fields[8].1,
            SubmissionField::File(f) if f.size() == 8
        ));
    }
}
