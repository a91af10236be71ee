//! Admin dashboard summary.
//!
//! The backend aggregates and the first listing page are independent
//! reads, so they are issued concurrently. Status-tab counts come from
//! the listing page on the client side, the same numbers the admin UI
//! shows above its tabs.

use anyhow::Result;
use serde_json::json;

use ceritadata_client::{AdminStoryQuery, Api, RetryPolicy};
use ceritadata_core::StoryStatus;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the dashboard command.
pub async fn run(api: &Api, cli: &Cli) -> Result<()> {
    let retry = RetryPolicy::default();
    let stats_api = api.stats();
    let admin_api = api.admin_stories();
    let query = AdminStoryQuery::default();

    let (stats, page) = tokio::join!(
        retry.run(|| stats_api.dashboard()),
        retry.run(|| admin_api.list(&query)),
    );
    let stats = stats?;
    let page = page?;

    let tab_counts: Vec<(StoryStatus, usize)> = StoryStatus::all()
        .iter()
        .map(|status| {
            let count = page.data.iter().filter(|s| s.status == *status).count();
            (*status, count)
        })
        .collect();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_dashboard(&stats, &tab_counts));
        }
        OutputFormat::Json => {
            let counts: serde_json::Map<String, serde_json::Value> = tab_counts
                .iter()
                .map(|(status, count)| (status.wire_name().to_string(), json!(count)))
                .collect();
            let payload = json!({ "stats": stats, "page_counts": counts });
            println!("{}", JsonFormatter::new(cli.pretty).format(&payload)?);
        }
    }
    Ok(())
}
