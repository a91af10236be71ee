//! Login, logout, and the current user.

use anyhow::Result;
use clap::Args;

use ceritadata_client::Api;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Login email.
    #[arg(long, short)]
    pub email: String,

    /// Password. Prefer the environment variable over the flag so the
    /// password stays out of shell history.
    #[arg(long, short, env = "CERITADATA_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Logs in and saves the token through the file session.
pub async fn login(args: &LoginArgs, api: &Api, cli: &Cli) -> Result<()> {
    let session = api.auth().login(&args.email, &args.password).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            if !cli.quiet {
                println!("Logged in as:");
            }
            println!("{}", formatter.format_user(&session.user));
        }
        OutputFormat::Json => {
            // The token stays in the session file; never echo it.
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&session.user)?);
        }
    }
    Ok(())
}

/// Logs out and clears the saved session.
pub async fn logout(api: &Api, cli: &Cli) -> Result<()> {
    api.auth().logout().await?;
    if !cli.quiet {
        println!("Logged out.");
    }
    Ok(())
}

/// Shows the currently authenticated user.
pub async fn whoami(api: &Api, cli: &Cli) -> Result<()> {
    let user = api.auth().current_user().await?;

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_user(&user));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&user)?);
        }
    }
    Ok(())
}
