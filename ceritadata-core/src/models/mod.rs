//! Domain models for ceritadata.
//!
//! Split by concern:
//! - [`story`] - the story aggregate and its parts
//! - [`chart`] - chart type, config, and data
//! - [`status`] - publication workflow states
//! - [`table`] - data-table config and CSV export
//! - [`stats`] - admin dashboard statistics
//! - [`user`] - user management types

pub mod chart;
pub mod stats;
pub mod status;
pub mod story;
pub mod table;
pub mod user;

pub use chart::{ChartConfig, ChartData, ChartType, Dataset, DatasetStyle};
pub use stats::{DashboardStats, PopularStory, StoryStats, UsageStats};
pub use status::StoryStatus;
pub use story::{ActivityLog, Story, StoryImage};
pub use table::{table_to_csv, DataTableConfig, TableData};
pub use user::{NewUser, PasswordChange, User, UserRole};
