//! Following tracker CLI entry point.
//!
//! This binary is the composition root for the workspace. Responsibilities:
//!
//! 1. **Parse configuration**: load the optional TOML file, apply flags and
//!    validate the result.
//! 2. **Wire observability**: install the `tracing-subscriber` layer that all
//!    spans and events from every crate flow through.
//! 3. **Construct infrastructure**: build the `GithubClient` and inject it
//!    into a `Tracker` as both followee source and relationship checker.
//! 4. **Select mode**: with `--user`, run one fetch and reconcile cycle and
//!    print the result; otherwise start the interactive prompt.
//!
//! ## Example
//!
//! ```bash
//! # One-shot, JSON output
//! following-tracker --user octocat --json
//!
//! # Interactive
//! following-tracker --theme light
//! > octocat
//! > next
//! ```

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use github::GithubClient;
use tracing::{info, warn};
use tracker::Tracker;

mod config;
mod logging;
mod render;
mod shell;

use config::{FileConfig, Overrides, Settings, ThemeChoice};
use logging::LogFormat;
use shell::Output;

/// See whether the accounts a GitHub user follows follow them back.
#[derive(Parser, Debug)]
#[command(name = "following-tracker")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Look up this user once and exit instead of starting the prompt
    #[arg(long, short)]
    user: Option<String>,

    /// Check relationships against this account instead of the queried user
    #[arg(long)]
    viewer: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Colour theme
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Followees per page (1-100)
    #[arg(long)]
    per_page: Option<u32>,

    /// GitHub REST API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Print the session as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Never emit colour escape sequences
    #[arg(long)]
    no_color: bool,

    /// Log line format (logs go to stderr; filter with RUST_LOG)
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_format)?;

    let file = match &cli.config {
        Some(path) => FileConfig::load(path).await?,
        None => FileConfig::default(),
    };
    let overrides = Overrides {
        base_url: cli.base_url,
        per_page: cli.per_page,
        viewer: cli.viewer,
        theme: cli.theme,
    };
    let settings = Settings::resolve(file, overrides, |key| std::env::var(key).ok())?;

    let client = GithubClient::new(&settings.github).context("failed to set up GitHub client")?;
    let mut tracker = Tracker::new(
        client.clone(),
        client,
        settings.per_page,
        settings.session,
    );
    info!(session_id = %tracker.session_id(), "tracker session started");

    let output = Output {
        json: cli.json,
        color: !cli.no_color && !cli.json && std::io::stdout().is_terminal(),
    };

    match cli.user {
        Some(user) => {
            if let Err(error) = tracker.submit(&user).await {
                warn!(%error, "lookup failed");
            }
            println!("{}", output.screen(&tracker)?.trim_end());
        }
        None => shell::run(&mut tracker, output).await?,
    }

    Ok(())
}
