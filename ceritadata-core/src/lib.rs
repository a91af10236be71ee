// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # ceritadata Core
//!
//! Domain models and shared types for the ceritadata data-story CMS client.
//!
//! A "data story" is a narrative article built around one chart and one
//! data table. This crate holds the types shared by the API client, the
//! editor form model, and the CLI:
//!
//! - [`Story`] and its parts ([`StoryImage`], [`ActivityLog`])
//! - Chart types ([`ChartType`], [`ChartConfig`], [`ChartData`],
//!   [`Dataset`], [`DatasetStyle`])
//! - The publication workflow ([`StoryStatus`])
//! - The data table ([`DataTableConfig`], [`TableData`], [`table_to_csv`])
//! - Admin-side models ([`DashboardStats`], [`User`], ...)
//! - The shared error type ([`CoreError`])

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Story
    ActivityLog,
    Story,
    StoryImage,
    // Chart
    ChartConfig,
    ChartData,
    ChartType,
    Dataset,
    DatasetStyle,
    // Status
    StoryStatus,
    // Data table
    DataTableConfig,
    TableData,
    table_to_csv,
    // Stats
    DashboardStats,
    PopularStory,
    StoryStats,
    UsageStats,
    // Users
    NewUser,
    PasswordChange,
    User,
    UserRole,
};
