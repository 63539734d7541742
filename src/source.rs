//! # Source: Loading the Project List
//!
//! The list page loads every project once, from the dashboard API or from a
//! saved JSON export, and hands the decoded records to the view engine.
//!
//! ```text
//! GET {base_url}/projects/   ──┐
//!                              ├─→ decode_projects ─→ Vec<Project>
//! projects.json (export)     ──┘
//! ```
//!
//! Both `{"projects": [...]}` (the API envelope) and a bare array are
//! accepted. A document that is not JSON, or has neither shape, is an error;
//! individual entries that are not objects are skipped with a warning.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::project::Project;

/// Decode a project list document.
pub fn decode_projects(json: &str) -> Result<Vec<Project>> {
    let doc: Value = serde_json::from_str(json).context("project list is not valid JSON")?;
    let items = match doc {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("projects") {
            Some(Value::Array(items)) => items,
            _ => anyhow::bail!("expected a \"projects\" array in the response object"),
        },
        _ => anyhow::bail!("expected a JSON array of projects or an object with \"projects\""),
    };

    let mut projects = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            warn!(index, "skipping project entry that is not an object");
            continue;
        }
        match serde_json::from_value::<Project>(item) {
            Ok(p) => projects.push(p),
            Err(e) => warn!(index, error = %e, "skipping undecodable project entry"),
        }
    }
    Ok(projects)
}

/// Load a project list from a JSON file.
pub fn load_projects_file(path: &Path) -> Result<Vec<Project>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading project list {}", path.display()))?;
    let projects = decode_projects(&content)?;
    info!(path = %path.display(), count = projects.len(), "loaded projects from file");
    Ok(projects)
}

/// Blocking client for the dashboard REST API.
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::config::Config::builder()
                .timeout_connect(Some(timeout))
                .timeout_send_request(Some(timeout))
                .timeout_recv_body(Some(timeout))
                .build(),
        );
        ApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            agent,
        }
    }

    pub fn projects_url(&self) -> String {
        format!("{}/projects/", self.base_url)
    }

    /// `GET /projects/` with the bearer token, when one is configured.
    pub fn fetch_projects(&self) -> Result<Vec<Project>> {
        let url = self.projects_url();
        let mut request = self.agent.get(&url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", &format!("Bearer {}", token));
        }
        let body = request
            .call()
            .with_context(|| format!("GET {}", url))?
            .body_mut()
            .read_to_string()
            .with_context(|| format!("reading response from {}", url))?;
        let projects = decode_projects(&body)?;
        info!(url = %url, count = projects.len(), "fetched projects");
        Ok(projects)
    }
}
