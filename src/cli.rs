//! # CLI Execution Functions
//!
//! Extracted from `main.rs` to keep the entry point slim. Contains the
//! execution logic for each subcommand: loading config and projects,
//! building the list query, and printing tables or JSON.

use anyhow::Result;
use chrono::{DateTime, Utc};
use linework::card::{find_project, format_currency, ProjectCard};
use linework::config::{self, DashboardConfig};
use linework::project::{parse_date, Project};
use linework::source::{self, ApiClient};
use linework::status::{active_statuses, terminal_statuses, StatusInfo, StatusValue};
use linework::timeline::timeline_progress;
use linework::view::{resolve_sort, ProjectQuery};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use super::{Cli, Commands};

const DEFAULT_CONFIG_PATH: &str = "linework.toml";

// ── Shared setup ────────────────────────────────────────────────

fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    match &cli.config {
        Some(path) => config::load_config(path, true),
        None => config::load_config(Path::new(DEFAULT_CONFIG_PATH), false),
    }
}

/// Load projects from `--input` when given, otherwise from the API.
fn load_projects(cli: &Cli, config: &DashboardConfig) -> Result<Vec<Project>> {
    if let Some(path) = &cli.input {
        return source::load_projects_file(path);
    }
    let base_url = cli
        .api_url
        .as_deref()
        .or(config.api.base_url.as_deref())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No project source: pass --input, --api-url (or LINEWORK_API_URL), or set api.base_url in the config"
            )
        })?;
    let client = ApiClient::new(
        base_url,
        cli.token.clone(),
        Duration::from_secs(config.api.timeout_secs),
    );
    client.fetch_projects()
}

fn reference_now(cli: &Cli) -> Result<DateTime<Utc>> {
    match cli.now.as_deref() {
        None => Ok(Utc::now()),
        Some(raw) => parse_date(raw)
            .ok_or_else(|| anyhow::anyhow!("--now '{}' is not a date (use YYYY-MM-DD)", raw)),
    }
}

fn short_date(project_date: Option<DateTime<Utc>>) -> String {
    project_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

// ── list ────────────────────────────────────────────────────────

/// Start from the selected (or default) view, then let flags override it.
fn build_query(cli: &Cli, config: &DashboardConfig) -> Result<ProjectQuery> {
    let Commands::List {
        view,
        search,
        min_budget,
        max_budget,
        start_date,
        end_date,
        status,
        sort_by,
        order,
        ..
    } = &cli.command
    else {
        return Ok(ProjectQuery::default());
    };

    let base = match view.as_deref() {
        Some(name) => Some(config.view(name).ok_or_else(|| {
            anyhow::anyhow!("Unknown view '{}'. Run `linework views` to list them", name)
        })?),
        None => config.default_view(),
    };
    let mut query = base.map(|v| v.to_query()).unwrap_or_default();
    if let Some(v) = base {
        debug!(view = %v.name, "starting from saved view");
    }

    if let Some(search) = search {
        query.search = search.clone();
    }
    if min_budget.is_some() {
        query.filters.min_budget = *min_budget;
    }
    if max_budget.is_some() {
        query.filters.max_budget = *max_budget;
    }
    if start_date.is_some() {
        query.filters.start_date = start_date.clone();
    }
    if end_date.is_some() {
        query.filters.end_date = end_date.clone();
    }
    if let Some(status) = status {
        query.filters.status = Some(StatusValue::parse(status));
    }
    match (sort_by.as_deref(), order.as_deref()) {
        (Some(key), order) => {
            (query.sort_by, query.sort_order) = resolve_sort(Some(key), order);
        }
        (None, Some(order)) if query.sort_by.is_some() => {
            query.sort_order = resolve_sort(query.sort_by.map(|k| k.as_str()), Some(order)).1;
        }
        _ => {}
    }
    Ok(query)
}

pub fn run_list(cli: &Cli) -> Result<()> {
    let json = matches!(cli.command, Commands::List { json: true, .. });
    let config = load_config(cli)?;
    let query = build_query(cli, &config)?;
    let projects = load_projects(cli, &config)?;
    let now = reference_now(cli)?;

    let visible = query.apply(&projects);
    info!(
        total = projects.len(),
        visible = visible.len(),
        "project list ready"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }
    if visible.is_empty() {
        println!("No projects match");
        return Ok(());
    }

    println!(
        "{:<10} {:<32} {:<22} {:>14} {:<10} {:<10} {:>8}",
        "ID", "NAME", "STATUS", "BUDGET", "START", "END", "PROGRESS"
    );
    println!("{}", "-".repeat(112));
    for p in &visible {
        let id = p.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        let progress = timeline_progress(p.start(), p.end(), now);
        println!(
            "{:<10} {:<32} {:<22} {:>14} {:<10} {:<10} {:>7.0}%",
            id,
            p.name,
            p.status.label(),
            format_currency(p.estimated_budget),
            short_date(p.start()),
            short_date(p.end()),
            progress
        );
    }
    match (query.sort_by, query.sort_order) {
        (Some(key), Some(order)) => println!(
            "\n{} of {} projects, sorted by {} {}",
            visible.len(),
            projects.len(),
            key,
            order
        ),
        _ => println!("\n{} of {} projects", visible.len(), projects.len()),
    }
    Ok(())
}

// ── show ────────────────────────────────────────────────────────

pub fn run_show(cli: &Cli, key: &str, json: bool) -> Result<()> {
    let config = load_config(cli)?;
    let projects = load_projects(cli, &config)?;
    let now = reference_now(cli)?;

    let project = find_project(&projects, key)
        .ok_or_else(|| anyhow::anyhow!("Project '{}' not found", key))?;
    let card = ProjectCard::build(project, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&card)?);
        return Ok(());
    }

    println!("Project: {} ({})", card.name, card.slug);
    println!("  Status:      {}", card.status_label);
    println!("  Location:    {}", card.location);
    println!("  Budget:      {}", card.budget);
    println!("  Start:       {}", card.start_date);
    println!("  End:         {}", card.end_date);
    println!(
        "  Actual:      {} to {}",
        card.actual_start_date, card.actual_end_date
    );
    println!("  Actual cost: {}", card.actual_cost);
    if let Some(days) = card.timeline.scheduled_days {
        println!("  Duration:    {} days", days);
    }
    println!("  Progress:    {:.0}%", card.timeline.progress_pct);
    match card.timeline.days_remaining {
        Some(days) if days < 0 => println!("  Remaining:   {} days overdue", -days),
        Some(days) => println!("  Remaining:   {} days", days),
        None => println!("  Remaining:   N/A"),
    }
    println!("\n{}", card.description);
    Ok(())
}

// ── statuses / views ────────────────────────────────────────────

fn print_status_rows(statuses: &[&StatusInfo]) {
    for s in statuses {
        println!(
            "{:>5}  {:<20} {:<22} {:<8} {}",
            s.sort_order, s.value, s.label, s.color, s.description
        );
    }
}

pub fn run_statuses() -> Result<()> {
    println!(
        "{:>5}  {:<20} {:<22} {:<8} {}",
        "ORDER", "VALUE", "LABEL", "COLOR", "DESCRIPTION"
    );
    println!("{}", "-".repeat(100));
    print_status_rows(&active_statuses());
    println!("\nHidden by default (select with `list --status`):");
    print_status_rows(&terminal_statuses());
    Ok(())
}

pub fn run_views(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    if config.views.is_empty() {
        println!("No views configured");
        return Ok(());
    }
    let default = config.display.default_view.as_deref();
    for view in &config.views {
        let marker = if Some(view.name.as_str()) == default { "*" } else { " " };
        let q = view.to_query();
        let sort = match (q.sort_by, q.sort_order) {
            (Some(key), Some(order)) => format!("{} {}", key, order),
            _ => "input order".to_string(),
        };
        println!("{} {:<24} sort: {}", marker, view.name, sort);
        if q.filters.is_empty() && q.search.trim().is_empty() {
            println!("    no filters");
        }
        if !q.search.trim().is_empty() {
            println!("    search: {:?}", q.search);
        }
        if let Some(status) = q.filters.status_filter() {
            println!("    status: {}", status);
        }
        if q.filters.min_budget.is_some() || q.filters.max_budget.is_some() {
            println!(
                "    budget: {} .. {}",
                q.filters.min_budget.map(|b| format_currency(Some(b))).unwrap_or_default(),
                q.filters.max_budget.map(|b| format_currency(Some(b))).unwrap_or_default()
            );
        }
        if q.filters.start_date.is_some() || q.filters.end_date.is_some() {
            println!(
                "    dates:  {} .. {}",
                q.filters.start_date.as_deref().unwrap_or(""),
                q.filters.end_date.as_deref().unwrap_or("")
            );
        }
    }
    Ok(())
}
