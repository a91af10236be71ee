//! Admin story listing, workflow, and bulk operations.
//!
//! Every mutation evicts the `stories` keys from the shared cache
//! afterwards, so a listing issued later in the same run sees the
//! change.

use anyhow::Result;
use clap::{Args, Subcommand};

use ceritadata_client::{AdminStoryQuery, Api, ResponseCache};
use ceritadata_core::StoryStatus;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Admin subcommands.
#[derive(Subcommand)]
pub enum AdminCommand {
    /// List stories across all statuses.
    #[command(visible_alias = "ls")]
    List(AdminListArgs),

    /// Show one story by id.
    Show {
        /// Story id.
        id: u64,
    },

    /// Delete a story.
    Delete {
        /// Story id.
        id: u64,
    },

    /// Submit a draft for approval.
    Submit {
        /// Story id.
        id: u64,
    },

    /// Approve a pending story (approver role).
    Approve {
        /// Story id.
        id: u64,
        /// Optional note for the activity log.
        #[arg(long)]
        note: Option<String>,
    },

    /// Reject a pending story back to draft (approver role).
    Reject {
        /// Story id.
        id: u64,
        /// Reason shown to the author.
        #[arg(long)]
        reason: String,
    },

    /// Delete several stories in one request.
    BulkDelete {
        /// Story ids.
        #[arg(required = true)]
        ids: Vec<u64>,
    },

    /// Approve several stories in one request.
    BulkApprove {
        /// Story ids.
        #[arg(required = true)]
        ids: Vec<u64>,
    },

    /// Clone a story into a new draft.
    #[command(name = "clone")]
    CloneStory {
        /// Story id.
        id: u64,
    },

    /// Show the activity log.
    Logs {
        /// Limit to one story.
        #[arg(long)]
        story: Option<u64>,
    },
}

/// Arguments for the admin list command.
#[derive(Args, Default)]
pub struct AdminListArgs {
    /// Status tab (draft, pending_approval, published).
    #[arg(long)]
    pub status: Option<String>,

    /// Free-text search term.
    #[arg(long, short)]
    pub search: Option<String>,

    /// 1-based page number.
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Page size.
    #[arg(long, default_value = "10")]
    pub per_page: u32,
}

/// Runs an admin subcommand.
pub async fn run(
    command: &AdminCommand,
    api: &Api,
    cache: &ResponseCache,
    cli: &Cli,
) -> Result<()> {
    let admin = api.admin_stories();

    match command {
        AdminCommand::List(args) => {
            let query = AdminStoryQuery {
                status: parse_status(args.status.as_deref())?,
                search: args.search.clone(),
                page: Some(args.page),
                per_page: Some(args.per_page),
            };
            let page = admin.list(&query).await?;
            match cli.format {
                OutputFormat::Text => {
                    println!("{}", TextFormatter::new(!cli.no_color).format_story_list(&page));
                }
                OutputFormat::Json => {
                    println!("{}", JsonFormatter::new(cli.pretty).format(&page)?);
                }
            }
        }
        AdminCommand::Show { id } => {
            let story = admin.get(*id).await?;
            match cli.format {
                OutputFormat::Text => {
                    println!("{}", TextFormatter::new(!cli.no_color).format_story(&story));
                }
                OutputFormat::Json => {
                    println!("{}", JsonFormatter::new(cli.pretty).format(&story)?);
                }
            }
        }
        AdminCommand::Delete { id } => {
            admin.delete(*id).await?;
            cache.clear(Some("stories"));
            confirm(cli, &format!("Story {id} deleted."));
        }
        AdminCommand::Submit { id } => {
            admin.submit_for_approval(*id).await?;
            cache.clear(Some("stories"));
            confirm(cli, &format!("Story {id} submitted for approval."));
        }
        AdminCommand::Approve { id, note } => {
            admin.approve(*id, note.as_deref()).await?;
            cache.clear(Some("stories"));
            confirm(cli, &format!("Story {id} approved and published."));
        }
        AdminCommand::Reject { id, reason } => {
            admin.reject(*id, reason).await?;
            cache.clear(Some("stories"));
            confirm(cli, &format!("Story {id} rejected back to draft."));
        }
        AdminCommand::BulkDelete { ids } => {
            admin.bulk_delete(ids).await?;
            cache.clear(Some("stories"));
            confirm(cli, &format!("{} stories deleted.", ids.len()));
        }
        AdminCommand::BulkApprove { ids } => {
            admin.bulk_approve(ids).await?;
            cache.clear(Some("stories"));
            confirm(cli, &format!("{} stories approved.", ids.len()));
        }
        AdminCommand::CloneStory { id } => {
            let copy = admin.clone_story(*id).await?;
            cache.clear(Some("stories"));
            confirm(cli, &format!("Story {id} cloned as {} ({}).", copy.id, copy.slug));
        }
        AdminCommand::Logs { story } => {
            let logs = admin.activity_logs(*story).await?;
            match cli.format {
                OutputFormat::Text => {
                    println!("{}", TextFormatter::new(!cli.no_color).format_activity(&logs));
                }
                OutputFormat::Json => {
                    println!("{}", JsonFormatter::new(cli.pretty).format(&logs)?);
                }
            }
        }
    }
    Ok(())
}

fn confirm(cli: &Cli, message: &str) {
    if !cli.quiet {
        println!("{message}");
    }
}

/// Parses a status filter from its wire name.
fn parse_status(arg: Option<&str>) -> Result<Option<StoryStatus>> {
    match arg {
        None => Ok(None),
        Some(name) => StoryStatus::from_wire_name(name).map(Some).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown status: {name}. Valid options: draft, pending_approval, published"
            )
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_wire_names() {
        assert_eq!(parse_status(None).unwrap(), None);
        assert_eq!(
            parse_status(Some("draft")).unwrap(),
            Some(StoryStatus::Draft)
        );
        assert_eq!(
            parse_status(Some("pending_approval")).unwrap(),
            Some(StoryStatus::PendingApproval)
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(parse_status(Some("archived")).is_err());
    }
}
