//! Pre-submit validation.
//!
//! The validator derives the single blocking issue from the current
//! draft state in a fixed order; it never stores validity as separate
//! state. An issue's `Display` text is the message shown to the user.

use thiserror::Error;

use crate::draft::EditorDraft;

/// A blocking problem with the draft, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftIssue {
    /// The title is empty or whitespace.
    #[error("Title is required")]
    TitleMissing,

    /// The description is empty or whitespace.
    #[error("Description is required")]
    DescriptionMissing,

    /// The narrative body is empty or whitespace.
    #[error("Story content is required")]
    ContentMissing,

    /// The chart has no labels.
    #[error("Chart labels are required")]
    LabelsMissing,

    /// The chart has no data values.
    #[error("Chart data values are required")]
    ValuesMissing,

    /// Labels and values disagree in length.
    #[error("Labels and data values must have the same length")]
    LengthMismatch,
}

/// Returns the first blocking issue with the draft, or `None` when it
/// is ready to submit.
pub fn validate(draft: &EditorDraft) -> Option<DraftIssue> {
    if draft.title.trim().is_empty() {
        return Some(DraftIssue::TitleMissing);
    }
    if draft.description.trim().is_empty() {
        return Some(DraftIssue::DescriptionMissing);
    }
    if draft.story_content.trim().is_empty() {
        return Some(DraftIssue::ContentMissing);
    }

    let labels = draft.chart_data.labels.len();
    let values = draft.chart_data.primary().map_or(0, |d| d.data.len());
    if labels == 0 {
        return Some(DraftIssue::LabelsMissing);
    }
    if values == 0 {
        return Some(DraftIssue::ValuesMissing);
    }
    if labels != values {
        return Some(DraftIssue::LengthMismatch);
    }

    None
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> EditorDraft {
        let mut draft = EditorDraft::new();
        draft.title = "Tren Pengangguran".to_string();
        draft.description = "TPT tiga tahun terakhir".to_string();
        draft.story_content = "<p>Naik lalu turun.</p>".to_string();
        draft.set_labels_csv("2022, 2023, 2024");
        draft.set_data_values_csv("5.8, 5.3, 4.9");
        draft
    }

    #[test]
    fn complete_draft_passes() {
        assert_eq!(validate(&filled_draft()), None);
    }

    #[test]
    fn issues_come_in_a_fixed_order() {
        let mut draft = EditorDraft::new();
        assert_eq!(validate(&draft), Some(DraftIssue::TitleMissing));

        draft.title = "Judul".to_string();
        assert_eq!(validate(&draft), Some(DraftIssue::DescriptionMissing));

        draft.description = "Deskripsi".to_string();
        assert_eq!(validate(&draft), Some(DraftIssue::ContentMissing));

        draft.story_content = "Isi".to_string();
        assert_eq!(validate(&draft), Some(DraftIssue::LabelsMissing));

        draft.set_labels_csv("a, b");
        assert_eq!(validate(&draft), Some(DraftIssue::ValuesMissing));

        draft.set_data_values_csv("1");
        assert_eq!(validate(&draft), Some(DraftIssue::LengthMismatch));

        draft.set_data_values_csv("1, 2");
        assert_eq!(validate(&draft), None);
    }

    #[test]
    fn whitespace_only_fields_do_not_pass() {
        let mut draft = filled_draft();
        draft.title = "   ".to_string();
        assert_eq!(validate(&draft), Some(DraftIssue::TitleMissing));
    }

    #[test]
    fn length_mismatch_in_both_directions() {
        let mut draft = filled_draft();
        draft.set_data_values_csv("1, 2, 3, 4");
        assert_eq!(validate(&draft), Some(DraftIssue::LengthMismatch));

        draft.set_labels_csv("a, b, c, d, e");
        assert_eq!(validate(&draft), Some(DraftIssue::LengthMismatch));
    }

    #[test]
    fn messages_are_user_facing_text() {
        assert_eq!(DraftIssue::TitleMissing.to_string(), "Title is required");
        assert_eq!(
            DraftIssue::LengthMismatch.to_string(),
            "Labels and data values must have the same length"
        );
    }
}
