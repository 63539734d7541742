//! Query types: field filters, sort key, sort direction, and the bundled
//! [`ProjectQuery`] a page (or a saved view) hands to the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use super::engine::visible_projects;
use crate::project::{parse_date, Project};
use crate::status::StatusValue;

/// Field filters. Every field is optional; absent means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    #[serde(default)]
    pub min_budget: Option<f64>,
    #[serde(default)]
    pub max_budget: Option<f64>,
    /// Inclusive lower bound on a project's start date (raw form input).
    #[serde(default)]
    pub start_date: Option<String>,
    /// Inclusive upper bound on a project's end date (raw form input).
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: Option<StatusValue>,
}

/// A date bound that was supplied. An unparsable bound still constrains:
/// nothing satisfies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateBound {
    At(DateTime<Utc>),
    Unparsable,
}

impl DateBound {
    fn from_input(raw: Option<&str>) -> Option<DateBound> {
        let raw = raw.map(str::trim).filter(|r| !r.is_empty())?;
        Some(match parse_date(raw) {
            Some(at) => DateBound::At(at),
            None => DateBound::Unparsable,
        })
    }
}

impl FilterConfig {
    /// The explicit status filter, if any. An empty status select counts as
    /// no filter.
    pub fn status_filter(&self) -> Option<&StatusValue> {
        self.status
            .as_ref()
            .filter(|s| !s.as_str().trim().is_empty())
    }

    pub(crate) fn start_bound(&self) -> Option<DateBound> {
        DateBound::from_input(self.start_date.as_deref())
    }

    pub(crate) fn end_bound(&self) -> Option<DateBound> {
        DateBound::from_input(self.end_date.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.min_budget.is_none()
            && self.max_budget.is_none()
            && self.start_bound().is_none()
            && self.end_bound().is_none()
            && self.status_filter().is_none()
    }
}

/// Column the project list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    Budget,
    StartDate,
    EndDate,
    Location,
    Status,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Name,
        SortKey::Budget,
        SortKey::StartDate,
        SortKey::EndDate,
        SortKey::Location,
        SortKey::Status,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Budget => "budget",
            SortKey::StartDate => "startDate",
            SortKey::EndDate => "endDate",
            SortKey::Location => "location",
            SortKey::Status => "status",
        }
    }

    /// Accepts `startDate`, `start_date`, `start-date` in any case.
    pub fn parse(raw: &str) -> Option<SortKey> {
        let norm: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match norm.as_str() {
            "name" => Some(SortKey::Name),
            "budget" | "estimatedbudget" => Some(SortKey::Budget),
            "startdate" | "start" => Some(SortKey::StartDate),
            "enddate" | "end" => Some(SortKey::EndDate),
            "location" => Some(SortKey::Location),
            "status" => Some(SortKey::Status),
            _ => None,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::parse(s).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown sort key '{}'. Valid keys: {}",
                s,
                SortKey::ALL.map(SortKey::as_str).join(", ")
            )
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    pub fn parse(raw: &str) -> Option<SortOrder> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortOrder::Ascending),
            "desc" | "descending" => Some(SortOrder::Descending),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::parse(s)
            .ok_or_else(|| anyhow::anyhow!("Unknown sort order '{}'. Use 'asc' or 'desc'", s))
    }
}

/// Resolve raw sort inputs into engine arguments without failing.
///
/// A missing key means no sort. An unrecognised key or direction also means
/// no sort (logged at `warn`). A valid key with no direction sorts ascending.
pub fn resolve_sort(
    sort_by: Option<&str>,
    sort_order: Option<&str>,
) -> (Option<SortKey>, Option<SortOrder>) {
    let Some(raw_key) = sort_by.map(str::trim).filter(|k| !k.is_empty()) else {
        return (None, None);
    };
    let Some(key) = SortKey::parse(raw_key) else {
        warn!(sort_by = raw_key, "ignoring unknown sort key");
        return (None, None);
    };
    let order = match sort_order.map(str::trim).filter(|o| !o.is_empty()) {
        None => Some(SortOrder::Ascending),
        Some(raw) => {
            let parsed = SortOrder::parse(raw);
            if parsed.is_none() {
                warn!(sort_order = raw, "ignoring unknown sort order");
            }
            parsed
        }
    };
    (Some(key), order)
}

/// Everything the list page holds besides the project list itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub filters: FilterConfig,
    #[serde(default)]
    pub sort_by: Option<SortKey>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
}

impl ProjectQuery {
    pub fn new() -> Self {
        ProjectQuery::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn filters(mut self, filters: FilterConfig) -> Self {
        self.filters = filters;
        self
    }

    pub fn sort(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort_by = Some(key);
        self.sort_order = Some(order);
        self
    }

    /// Run the engine over `all`.
    pub fn apply<'a>(&self, all: &'a [Project]) -> Vec<&'a Project> {
        visible_projects(
            all,
            &self.filters,
            &self.search,
            self.sort_by,
            self.sort_order,
        )
    }
}
