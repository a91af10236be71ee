// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! ceritadata CLI - read, manage, and export data stories from the
//! command line.
//!
//! # Examples
//!
//! ```bash
//! # Log in (token is saved to the config dir)
//! ceritadata login --email admin@example.com --password secret
//!
//! # Published stories, searched and paged
//! ceritadata stories list --search pengangguran --page 2
//!
//! # One story, as JSON
//! ceritadata stories show tren-tpt --format json
//!
//! # Admin dashboard summary
//! ceritadata dashboard
//!
//! # Approval workflow
//! ceritadata admin submit 12
//! ceritadata admin approve 12 --note "Angka sudah diverifikasi"
//!
//! # Data table, paged, or exported as CSV
//! ceritadata data tren-tpt --page 2
//! ceritadata data tren-tpt --export tren-tpt.csv
//! ```

mod commands;
mod output;
mod session_file;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ceritadata_client::{Api, ApiError, ResponseCache};
use commands::{admin, auth, dashboard, data, stories};
use session_file::FileSession;

// ============================================================================
// CLI Definition
// ============================================================================

/// ceritadata CLI - data-story CMS from the command line.
#[derive(Parser)]
#[command(name = "ceritadata")]
#[command(about = "Read, manage, and export data stories")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Backend API base URL.
    #[arg(
        long,
        env = "CERITADATA_API_URL",
        default_value = "http://localhost:8000/api",
        global = true
    )]
    pub api_url: String,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Log in and save the session token.
    Login(auth::LoginArgs),

    /// Log out and clear the saved session.
    Logout,

    /// Show the currently authenticated user.
    Whoami,

    /// Read published stories.
    #[command(subcommand, visible_alias = "s")]
    Stories(stories::StoriesCommand),

    /// Show the admin dashboard summary.
    #[command(visible_alias = "d")]
    Dashboard,

    /// Admin story CRUD and the approval workflow.
    #[command(subcommand, visible_alias = "a")]
    Admin(admin::AdminCommand),

    /// Show or export a story's data table.
    Data(data::DataArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Not logged in, or the session expired.
    AuthRequired = 2,
    /// The requested story or resource does not exist.
    NotFound = 3,
    /// The request was rejected as invalid.
    InvalidInput = 4,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("ceritadata=debug,info")
    } else {
        EnvFilter::new("ceritadata=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let session = Arc::new(FileSession::load());
    let api = match Api::new(&cli.api_url, session) {
        Ok(api) => api,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e}");
            }
            std::process::exit(ExitCode::InvalidInput as i32);
        }
    };
    let cache = ResponseCache::new();

    let result = match &cli.command {
        Commands::Login(args) => auth::login(args, &api, &cli).await,
        Commands::Logout => auth::logout(&api, &cli).await,
        Commands::Whoami => auth::whoami(&api, &cli).await,
        Commands::Stories(command) => stories::run(command, &api, &cache, &cli).await,
        Commands::Dashboard => dashboard::run(&api, &cli).await,
        Commands::Admin(command) => admin::run(command, &api, &cache, &cli).await,
        Commands::Data(args) => data::run(args, &api, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            match e.downcast_ref::<ApiError>() {
                Some(api_err) => eprintln!("Error: {}", api_err.user_message()),
                None => eprintln!("Error: {e}"),
            }
        }
        std::process::exit(exit_code_for(&e) as i32);
    }

    Ok(())
}

/// Maps a failure to the process exit code.
fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<ApiError>() {
        Some(ApiError::Unauthorized) => ExitCode::AuthRequired,
        Some(ApiError::NotFound) => ExitCode::NotFound,
        Some(ApiError::BadRequest { .. } | ApiError::Validation { .. }) => ExitCode::InvalidInput,
        _ => ExitCode::Error,
    }
}
