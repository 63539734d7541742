//! # Card: Project Card Display Values
//!
//! Display strings for the project card and report headers: currency, dates,
//! text fallbacks, and the slug used in project links. Pairs each project
//! with its timeline figures in a [`ProjectCard`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::project::Project;
use crate::timeline::TimelineSummary;

pub const NO_LOCATION: &str = "No location specific";
pub const NO_DESCRIPTION: &str = "No description provided.";
pub const NO_DATE: &str = "N/A";

/// Insert thousands separators into a run of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `$1,250,000`. Rounds half away from zero; absent amounts show `$0`.
pub fn format_currency(amount: Option<f64>) -> String {
    let rounded = amount.unwrap_or(0.0).round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!(
        "{}${}",
        sign,
        group_thousands(&format!("{:.0}", rounded.abs()))
    )
}

/// `$1,250,000.00`; absent amounts show `$0.00`.
pub fn format_currency_cents(amount: Option<f64>) -> String {
    let cents = (amount.unwrap_or(0.0) * 100.0).round();
    let sign = if cents < 0.0 { "-" } else { "" };
    let cents = cents.abs();
    let whole = (cents / 100.0).trunc();
    let frac = cents - whole * 100.0;
    format!(
        "{}${}.{:02}",
        sign,
        group_thousands(&format!("{:.0}", whole)),
        frac as u64
    )
}

/// `Mar 5, 2025`, or `N/A`.
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| NO_DATE.to_string())
}

/// Link slug: the id when present, otherwise the lower-cased name with each
/// run of whitespace replaced by a single `-`.
pub fn card_slug(project: &Project) -> String {
    if let Some(id) = &project.id {
        return id.to_string();
    }
    let mut slug = String::with_capacity(project.name.len());
    let mut in_space = false;
    for c in project.name.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.push(c);
            in_space = false;
        }
    }
    slug
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

/// Everything a project card renders, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub slug: String,
    pub name: String,
    pub status: String,
    pub status_label: String,
    pub status_color: Option<&'static str>,
    pub location: String,
    pub description: String,
    pub budget: String,
    /// Two-decimal actual spend, as on the project report.
    pub actual_cost: String,
    pub start_date: String,
    pub end_date: String,
    pub actual_start_date: String,
    pub actual_end_date: String,
    pub timeline: TimelineSummary,
}

impl ProjectCard {
    pub fn build(project: &Project, now: DateTime<Utc>) -> Self {
        ProjectCard {
            slug: card_slug(project),
            name: project.name.clone(),
            status: project.status.as_str().to_string(),
            status_label: project.status.label().to_string(),
            status_color: project.status.known().map(|s| s.info().color),
            location: non_empty(project.location.as_deref())
                .unwrap_or(NO_LOCATION)
                .to_string(),
            description: non_empty(project.description.as_deref())
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            budget: format_currency(project.estimated_budget),
            actual_cost: format_currency_cents(project.actual_cost),
            start_date: format_date(project.start()),
            end_date: format_date(project.end()),
            actual_start_date: format_date(project.actual_start()),
            actual_end_date: format_date(project.actual_end()),
            timeline: TimelineSummary::for_project(project, now),
        }
    }
}

/// Find a project by id or by card slug.
pub fn find_project<'a>(projects: &'a [Project], key: &str) -> Option<&'a Project> {
    let key = key.trim();
    projects
        .iter()
        .find(|p| p.id.as_ref().is_some_and(|id| id.to_string() == key))
        .or_else(|| projects.iter().find(|p| card_slug(p) == key))
}
