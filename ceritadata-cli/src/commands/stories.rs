//! Public story reading: listing, detail, search, featured.
//!
//! The listing composes the shared [`ResponseCache`] (keyed by the
//! query) around a retried fetch, so repeated listings within one run
//! answer from memory and transient failures are re-attempted.

use anyhow::Result;
use clap::{Args, Subcommand};

use ceritadata_client::{Api, ApiError, Paginated, ResponseCache, RetryPolicy, StoryListQuery};
use ceritadata_core::Story;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Story subcommands.
#[derive(Subcommand)]
pub enum StoriesCommand {
    /// List published stories.
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one story by slug.
    Show {
        /// Story slug.
        slug: String,
    },

    /// List featured stories.
    Featured,

    /// Full-text search.
    Search {
        /// Search term.
        term: String,
    },
}

/// Arguments for the list command.
#[derive(Args, Default)]
pub struct ListArgs {
    /// Free-text search term.
    #[arg(long, short)]
    pub search: Option<String>,

    /// Category filter.
    #[arg(long)]
    pub category: Option<String>,

    /// 1-based page number.
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Page size.
    #[arg(long, default_value = "10")]
    pub per_page: u32,
}

/// Runs a story subcommand.
pub async fn run(
    command: &StoriesCommand,
    api: &Api,
    cache: &ResponseCache,
    cli: &Cli,
) -> Result<()> {
    match command {
        StoriesCommand::List(args) => list(args, api, cache, cli).await,
        StoriesCommand::Show { slug } => show(slug, api, cli).await,
        StoriesCommand::Featured => featured(api, cli).await,
        StoriesCommand::Search { term } => search(term, api, cli).await,
    }
}

async fn list(args: &ListArgs, api: &Api, cache: &ResponseCache, cli: &Cli) -> Result<()> {
    let query = StoryListQuery {
        search: args.search.clone(),
        category: args.category.clone(),
        page: Some(args.page),
        per_page: Some(args.per_page),
    };
    let key = query.cache_key();
    let pairs = query.to_query();

    let retry = RetryPolicy::default();
    let value = cache
        .get_or_fetch(&key, || async {
            retry.run(|| api.client().get_value("stories", &pairs)).await
        })
        .await?;
    let page: Paginated<Story> =
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_story_list(&page));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&page)?);
        }
    }
    Ok(())
}

async fn show(slug: &str, api: &Api, cli: &Cli) -> Result<()> {
    let story = api.stories().by_slug(slug).await?;

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_story(&story));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&story)?);
        }
    }
    Ok(())
}

async fn featured(api: &Api, cli: &Cli) -> Result<()> {
    let stories = api.stories().featured().await?;
    print_story_rows(&stories, cli)
}

async fn search(term: &str, api: &Api, cli: &Cli) -> Result<()> {
    let stories = api.stories().search(term).await?;
    print_story_rows(&stories, cli)
}

fn print_story_rows(stories: &[Story], cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            if stories.is_empty() {
                println!("No stories found.");
            }
            for story in stories {
                println!(
                    "{:>4}  {:<12}  {:<24}  {}",
                    story.id,
                    formatter.format_status(story.status),
                    story.slug,
                    story.title
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&stories)?);
        }
    }
    Ok(())
}
