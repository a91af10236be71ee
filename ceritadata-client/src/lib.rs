// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # ceritadata Client
//!
//! The API access layer for the ceritadata backend: request/response
//! normalization, bearer-token attachment, an error taxonomy with
//! user-facing classification, retry with linear backoff, and a
//! short-TTL read cache.
//!
//! ## Layers
//!
//! - [`ApiClient`] - one HTTP door to the backend; attaches the session
//!   token, maps non-success statuses into [`ApiError`], and tears the
//!   session down on 401. It does not retry or cache.
//! - [`RetryPolicy`] / [`ResponseCache`] - composed *around* calls by
//!   callers that want them.
//! - [`api`] - typed resource clients (auth, stories, admin, files,
//!   stats, users, settings, export) built on [`ApiClient`].
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ceritadata_client::{Api, MemorySession};
//!
//! let session = Arc::new(MemorySession::new());
//! let api = Api::new("http://localhost:8000/api", session)?;
//! let auth = api.auth().login("admin@example.com", "secret").await?;
//! let stories = api.admin_stories().list(&Default::default()).await?;
//! ```

pub mod api;
pub mod cache;
pub mod error;
pub mod http;
pub mod multipart;
pub mod retry;
pub mod session;

// Errors
pub use error::{ApiError, ErrorBody};

// HTTP layer
pub use http::ApiClient;
pub use session::{MemorySession, SessionStore};

// Composition helpers
pub use cache::ResponseCache;
pub use retry::RetryPolicy;

// Submission encoding
pub use multipart::{ExistingImage, FilePart, StorySubmission, SubmissionField};

// Resource clients
pub use api::{
    AdminStoryApi, AdminStoryQuery, Api, AuthApi, AuthSession, ExportApi, FileApi, Paginated,
    SettingsApi, StatsApi, StoryApi, StoryListQuery, UserApi,
};
