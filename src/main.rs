//! # Main: CLI Entry Point
//!
//! Routes subcommands to the project-list functions in `cli.rs`. Handles the
//! shared concerns: `.env` loading, structured logging, and global options.
//!
//! ## Global Options
//!
//! - `--config` / `LINEWORK_CONFIG`: dashboard TOML (default `linework.toml`).
//! - `--api-url` / `LINEWORK_API_URL`: API base URL, overrides `[api]`.
//! - `--token` / `LINEWORK_TOKEN`: bearer token for the API.
//! - `--input`: read projects from a JSON export instead of the API.
//! - `--now`: reference date for progress and days remaining.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "linework", about = "Browse, filter, and sort utility construction projects")]
struct Cli {
    /// Dashboard config file (default: linework.toml in the working directory)
    #[arg(long, env = "LINEWORK_CONFIG")]
    config: Option<PathBuf>,

    /// Dashboard API base URL, e.g. http://localhost:8080/api
    #[arg(long, env = "LINEWORK_API_URL")]
    api_url: Option<String>,

    /// Bearer token sent with API requests
    #[arg(long, env = "LINEWORK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Read projects from a JSON file ({"projects": [...]} or a bare array)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Reference date for timeline figures (YYYY-MM-DD or RFC 3339; default: now)
    #[arg(long)]
    now: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List visible projects after search, filters, and sorting
    List {
        /// Start from a saved view in the config file
        #[arg(long)]
        view: Option<String>,
        /// Case-insensitive text matched against name, location, description
        #[arg(long)]
        search: Option<String>,
        /// Minimum estimated budget (inclusive)
        #[arg(long, value_parser = parse_budget)]
        min_budget: Option<f64>,
        /// Maximum estimated budget (inclusive)
        #[arg(long, value_parser = parse_budget)]
        max_budget: Option<f64>,
        /// Earliest start date (inclusive)
        #[arg(long)]
        start_date: Option<String>,
        /// Latest end date (inclusive)
        #[arg(long)]
        end_date: Option<String>,
        /// Exact status; cancelled and archived are only shown when selected here
        #[arg(long)]
        status: Option<String>,
        /// Sort column: name, budget, start-date, end-date, location, status
        #[arg(long)]
        sort_by: Option<String>,
        /// Sort direction: asc or desc
        #[arg(long)]
        order: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one project card by id or slug
    Show {
        /// Project id, or its name slug when the project has no id
        key: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the lifecycle status table
    Statuses,
    /// Print the saved views from the config file
    Views,
}

/// Budget bounds must be finite; a NaN bound would hide every project.
fn parse_budget(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{}' is not a finite amount", raw))
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // LOG_FORMAT=json for log shipping, human-readable otherwise. Logs go to
    // stderr so `--json` output stays clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();

    match &cli.command {
        Commands::List { .. } => cli::run_list(&cli),
        Commands::Show { key, json } => cli::run_show(&cli, key, *json),
        Commands::Statuses => cli::run_statuses(),
        Commands::Views => cli::run_views(&cli),
    }
}
