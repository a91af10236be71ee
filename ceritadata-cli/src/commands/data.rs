//! Story data table: paged display and local CSV export.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use ceritadata_client::Api;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Rows shown per page, excluding the header row.
const ROWS_PER_PAGE: usize = 10;

/// Arguments for the data command.
#[derive(Args)]
pub struct DataArgs {
    /// Story slug.
    pub slug: String,

    /// 1-based page of rows to display.
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Write the whole table to this file as CSV instead of rendering.
    /// The CSV is produced locally from the already-fetched table.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Runs the data command.
pub async fn run(args: &DataArgs, api: &Api, cli: &Cli) -> Result<()> {
    let table = api.stories().data_table(&args.slug).await?;

    if let Some(path) = &args.export {
        let csv = table.to_csv();
        std::fs::write(path, &csv)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), rows = table.rows.len(), "Table exported");
        if !cli.quiet {
            println!("Exported {} rows to {}", table.rows.len(), path.display());
        }
        return Ok(());
    }

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_table(&table, args.page, ROWS_PER_PAGE));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&table)?);
        }
    }
    Ok(())
}
