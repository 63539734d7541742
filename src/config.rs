//! # Config: Dashboard TOML Configuration
//!
//! A `linework.toml` file names the API to load projects from and stores
//! saved views: named search/filter/sort presets for the project list.
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080/api"
//! timeout_secs = 10
//!
//! [display]
//! default_view = "active-builds"
//!
//! [[views]]
//! name = "active-builds"
//! search = "substation"
//! sort_by = "budget"
//! sort_order = "desc"
//! min_budget = 50000
//! ```
//!
//! Structural problems (duplicate view names, inverted budget windows, a
//! default view that does not exist) reject the file. Unknown sort keys or
//! statuses inside a view only log a warning: the list engine already treats
//! them as "no sort" and "raw status match".

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

use crate::status::{ProjectStatus, StatusValue};
use crate::view::{resolve_sort, FilterConfig, ProjectQuery, SortKey, SortOrder};

/// Top-level configuration parsed from `linework.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub views: Vec<ViewConfig>,
}

/// The `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// The `[display]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub default_view: Option<String>,
}

/// One `[[views]]` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    pub name: String,
    #[serde(default)]
    pub search: String,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub min_budget: Option<f64>,
    pub max_budget: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

impl ViewConfig {
    /// Build the engine query for this view.
    pub fn to_query(&self) -> ProjectQuery {
        let (sort_by, sort_order) =
            resolve_sort(self.sort_by.as_deref(), self.sort_order.as_deref());
        ProjectQuery {
            search: self.search.clone(),
            filters: FilterConfig {
                min_budget: self.min_budget,
                max_budget: self.max_budget,
                start_date: self.start_date.clone(),
                end_date: self.end_date.clone(),
                status: self.status.as_deref().map(StatusValue::parse),
            },
            sort_by,
            sort_order,
        }
    }
}

impl DashboardConfig {
    pub fn view(&self, name: &str) -> Option<&ViewConfig> {
        self.views.iter().find(|v| v.name == name)
    }

    pub fn default_view(&self) -> Option<&ViewConfig> {
        self.display
            .default_view
            .as_deref()
            .and_then(|name| self.view(name))
    }
}

// ── TOML Parsing ────────────────────────────────────────────────

/// Parse a dashboard configuration from a TOML string.
pub fn parse_toml(content: &str) -> Result<DashboardConfig> {
    let config: DashboardConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a dashboard configuration from a TOML file path.
pub fn parse_toml_file(path: &Path) -> Result<DashboardConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_toml(&content).with_context(|| format!("invalid config {}", path.display()))
}

/// Load the config at `path`. A missing file is an error only when the path
/// was given explicitly; otherwise the defaults apply.
pub fn load_config(path: &Path, explicit: bool) -> Result<DashboardConfig> {
    if !explicit && !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(DashboardConfig::default());
    }
    parse_toml_file(path)
}

/// Validate a dashboard configuration for logical consistency.
fn validate_config(config: &DashboardConfig) -> Result<()> {
    if let Some(base_url) = &config.api.base_url {
        let parsed = url::Url::parse(base_url)
            .with_context(|| format!("api.base_url '{}' is not a valid URL", base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!(
                "api.base_url must use http or https, got '{}'",
                parsed.scheme()
            );
        }
    }
    if config.api.timeout_secs == 0 {
        anyhow::bail!("api.timeout_secs must be at least 1");
    }

    let mut seen = HashSet::new();
    for view in &config.views {
        if view.name.trim().is_empty() {
            anyhow::bail!("views.name is required");
        }
        if !seen.insert(view.name.as_str()) {
            anyhow::bail!("Duplicate view name '{}'", view.name);
        }
        for (field, value) in [
            ("min_budget", view.min_budget),
            ("max_budget", view.max_budget),
        ] {
            if let Some(value) = value {
                if !value.is_finite() {
                    anyhow::bail!(
                        "View '{}' has a non-finite {} ({})",
                        view.name,
                        field,
                        value
                    );
                }
            }
        }
        if let (Some(min), Some(max)) = (view.min_budget, view.max_budget) {
            if min > max {
                anyhow::bail!(
                    "View '{}' has min_budget {} above max_budget {}",
                    view.name,
                    min,
                    max
                );
            }
        }
        warn_on_lenient_fields(view);
    }

    if let Some(default) = &config.display.default_view {
        if config.view(default).is_none() {
            anyhow::bail!(
                "display.default_view '{}' does not match any view. Known views: {}",
                default,
                config
                    .views
                    .iter()
                    .map(|v| v.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }

    Ok(())
}

fn warn_on_lenient_fields(view: &ViewConfig) {
    if let Some(key) = view.sort_by.as_deref() {
        if let Err(e) = key.parse::<SortKey>() {
            warn!(view = %view.name, "{}; view will keep input order", e);
        }
    }
    if let Some(order) = view.sort_order.as_deref() {
        if let Err(e) = order.parse::<SortOrder>() {
            warn!(view = %view.name, "{}; view will keep input order", e);
        }
    }
    if let Some(status) = view.status.as_deref() {
        if !status.trim().is_empty() && ProjectStatus::from_value(status).is_none() {
            warn!(
                view = %view.name,
                status,
                "status is not in the lifecycle table; matching raw value"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[api]
base_url = "http://localhost:8080/api"

[display]
default_view = "active-builds"

[[views]]
name = "active-builds"
search = "substation"
sort_by = "budget"
sort_order = "desc"
min_budget = 50000
max_budget = 200000
start_date = "2025-01-01"

[[views]]
name = "cancelled"
status = "cancelled"
sort_by = "name"
"#;

    #[test]
    fn parse_full_config() {
        let config = parse_toml(SAMPLE).unwrap();
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("http://localhost:8080/api")
        );
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.views.len(), 2);
        assert_eq!(config.default_view().unwrap().name, "active-builds");

        let q = config.view("active-builds").unwrap().to_query();
        assert_eq!(q.search, "substation");
        assert_eq!(q.sort_by, Some(SortKey::Budget));
        assert_eq!(q.sort_order, Some(SortOrder::Descending));
        assert_eq!(q.filters.min_budget, Some(50_000.0));
        assert_eq!(q.filters.start_date.as_deref(), Some("2025-01-01"));

        let q = config.view("cancelled").unwrap().to_query();
        assert_eq!(
            q.filters.status,
            Some(StatusValue::Known(ProjectStatus::Cancelled))
        );
        assert_eq!(q.sort_order, Some(SortOrder::Ascending));
    }

    #[test]
    fn empty_config_is_default() {
        let config = parse_toml("").unwrap();
        assert!(config.api.base_url.is_none());
        assert!(config.views.is_empty());
        assert!(config.default_view().is_none());
    }

    #[test]
    fn duplicate_view_rejected() {
        let toml = "[[views]]\nname = \"a\"\n[[views]]\nname = \"a\"\n";
        assert!(parse_toml(toml).is_err());
    }

    #[test]
    fn inverted_budget_rejected() {
        let toml = "[[views]]\nname = \"a\"\nmin_budget = 10\nmax_budget = 5\n";
        assert!(parse_toml(toml).is_err());
    }

    #[test]
    fn non_finite_budget_rejected() {
        for value in ["nan", "inf", "-inf"] {
            let toml = format!("[[views]]\nname = \"a\"\nmin_budget = {}\n", value);
            let err = parse_toml(&toml).unwrap_err().to_string();
            assert!(err.contains("non-finite min_budget"), "{}", err);
        }
        assert!(
            parse_toml("[[views]]\nname = \"a\"\nmax_budget = nan\n").is_err()
        );
    }

    #[test]
    fn missing_default_view_rejected() {
        let toml = "[display]\ndefault_view = \"nope\"\n";
        let err = parse_toml(toml).unwrap_err().to_string();
        assert!(err.contains("nope"));
    }

    #[test]
    fn bad_base_url_rejected() {
        assert!(parse_toml("[api]\nbase_url = \"not a url\"\n").is_err());
        assert!(
            parse_toml("[api]\nbase_url = \"ftp://host/api\"\n").is_err()
        );
    }

    #[test]
    fn unknown_sort_key_degrades() {
        let toml = "[[views]]\nname = \"odd\"\nsort_by = \"priority\"\nstatus = \"in_progress\"\n";
        let config = parse_toml(toml).unwrap();
        let q = config.views[0].to_query();
        assert_eq!(q.sort_by, None);
        assert_eq!(q.sort_order, None);
        assert_eq!(
            q.filters.status,
            Some(StatusValue::Unknown("in_progress".into()))
        );
    }

    #[test]
    fn load_missing_default_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linework.toml");
        assert!(load_config(&path, false).unwrap().views.is_empty());
        assert!(load_config(&path, true).is_err());
    }
}
