// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # ceritadata Editor
//!
//! The story-editor form model: a mutable, client-owned draft of a
//! story plus pending file attachments, and the pre-submit validator.
//!
//! [`EditorDraft`] is created empty for a new story or hydrated from a
//! fetched [`ceritadata_core::Story`] for editing, mutated by every
//! field edit, and finally serialized into a
//! [`ceritadata_client::StorySubmission`] by
//! [`EditorDraft::build_submission`]. [`validate`] derives the single
//! blocking issue from the current draft; submission fails fast while
//! one exists.

pub mod attachments;
pub mod draft;
pub mod validate;

pub use attachments::{AttachmentError, MAX_DATA_FILE_BYTES, MAX_IMAGE_BYTES};
pub use draft::{CaptionKey, EditorDraft, EditorError, EditorMode};
pub use validate::{validate, DraftIssue};
