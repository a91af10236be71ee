//! Text output formatting with colors.

use chrono::{DateTime, Local, Utc};

use ceritadata_client::Paginated;
use ceritadata_core::{ActivityLog, DashboardStats, Story, StoryStatus, TableData, User};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a page of the story listing.
    pub fn format_story_list(&self, page: &Paginated<Story>) -> String {
        let mut lines = vec![format!(
            "{} (page {}/{}, {} total)",
            self.bold("Stories"),
            page.current_page,
            page.last_page,
            page.total
        )];

        if page.data.is_empty() {
            lines.push(self.dim("  no stories"));
        }
        for story in &page.data {
            lines.push(format!(
                "  {:>4}  {:<12}  {:<24}  {}",
                story.id,
                self.format_status(story.status),
                story.slug,
                story.title
            ));
        }

        lines.join("\n")
    }

    /// Formats one story in detail.
    pub fn format_story(&self, story: &Story) -> String {
        let mut lines = vec![
            self.bold(&story.title),
            format!("Slug:    {}", story.slug),
            format!("Status:  {}", self.format_status(story.status)),
            format!("Chart:   {}", story.chart_type.display_name()),
            format!("Updated: {}", format_local(story.updated_at)),
        ];

        if !story.description.is_empty() {
            lines.push(String::new());
            lines.push(story.description.clone());
        }
        if !story.images.is_empty() {
            lines.push(format!("Images:  {}", story.images.len()));
        }
        if let Some(path) = &story.data_file_path {
            lines.push(format!("Data:    {path}"));
        }

        lines.join("\n")
    }

    /// Formats the authenticated user.
    pub fn format_user(&self, user: &User) -> String {
        format!(
            "{} <{}>\nRole: {}",
            self.bold(&user.name),
            self.cyan(&user.email),
            if user.role.can_approve() {
                "admin (approver)"
            } else {
                "admin"
            }
        )
    }

    /// Formats the dashboard: backend aggregates plus the status-tab
    /// counts computed from the listing.
    pub fn format_dashboard(
        &self,
        stats: &DashboardStats,
        tab_counts: &[(StoryStatus, usize)],
    ) -> String {
        let mut lines = vec![
            self.bold("Dashboard"),
            format!("Stories:   {}", stats.total_stories),
            format!("Published: {}", self.green(&stats.published_stories.to_string())),
            format!("Drafts:    {}", self.yellow(&stats.draft_stories.to_string())),
            format!("In review: {}", self.blue(&stats.review_stories.to_string())),
            format!("Views:     {}", stats.total_views),
        ];

        if !tab_counts.is_empty() {
            lines.push(String::new());
            lines.push(self.dim("This page:"));
            for (status, count) in tab_counts {
                lines.push(format!("  {:<12} {count}", status.display_name()));
            }
        }

        lines.join("\n")
    }

    /// Formats one page of a data table.
    pub fn format_table(&self, table: &TableData, page: usize, rows_per_page: usize) -> String {
        let Some((header, body)) = table.rows.split_first() else {
            return self.dim("  empty table");
        };

        let total_pages = body.len().div_ceil(rows_per_page).max(1);
        let page = page.clamp(1, total_pages);
        let start = (page - 1) * rows_per_page;
        let slice = &body[start..(start + rows_per_page).min(body.len())];

        let mut lines = vec![self.bold(&header.join(" | "))];
        for row in slice {
            lines.push(row.join(" | "));
        }
        lines.push(self.dim(&format!("page {page}/{total_pages}, {} rows", body.len())));

        lines.join("\n")
    }

    /// Formats activity log entries.
    pub fn format_activity(&self, logs: &[ActivityLog]) -> String {
        if logs.is_empty() {
            return self.dim("no activity");
        }
        logs.iter()
            .map(|log| {
                format!(
                    "{}  {}  {} {}",
                    self.dim(&format_local(log.created_at)),
                    log.user_name,
                    log.action,
                    log.story_id
                        .map(|id| format!("(story {id})"))
                        .unwrap_or_default()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Formats a status with its workflow color.
    pub fn format_status(&self, status: StoryStatus) -> String {
        let label = status.display_name();
        match status {
            StoryStatus::Draft => self.yellow(label),
            StoryStatus::PendingApproval => self.blue(label),
            StoryStatus::Published => self.green(label),
        }
    }

    // ------------------------------------------------------------------------
    // Color helpers
    // ------------------------------------------------------------------------

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn blue(&self, text: &str) -> String {
        self.paint(BLUE, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

fn format_local(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
