//! Project record types decoded from the dashboard API.
//!
//! The API serializes projects with camelCase keys. Every field is optional
//! on the wire; decoding substitutes safe defaults instead of failing, so a
//! single malformed record never drops the whole list. Unrecognised keys are
//! kept in [`Project::extra`] and written back out unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use super::dates::parse_date;
use crate::status::StatusValue;

/// Opaque project identifier. The backend uses integer keys; imported
/// projects may carry string keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ProjectId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectId::Int(id) => write!(f, "{}", id),
            ProjectId::Text(id) => f.write_str(id),
        }
    }
}

/// A project as returned by `GET /projects/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ProjectId>,
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: StatusValue,
    #[serde(default, deserialize_with = "lenient_text")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub estimated_budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub actual_cost: Option<f64>,
    /// Raw date strings; parsed on demand so invalid values survive decoding.
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub actual_start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub actual_end_date: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Project {
    /// Minimal record with a name and status; used by tests and fixtures.
    pub fn new(name: impl Into<String>, status: impl Into<StatusValue>) -> Self {
        Project {
            name: name.into(),
            status: status.into(),
            ..Project::default()
        }
    }

    pub fn budget_or_zero(&self) -> f64 {
        self.estimated_budget.unwrap_or(0.0)
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start_date.as_deref().and_then(parse_date)
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end_date.as_deref().and_then(parse_date)
    }

    pub fn actual_start(&self) -> Option<DateTime<Utc>> {
        self.actual_start_date.as_deref().and_then(parse_date)
    }

    pub fn actual_end(&self) -> Option<DateTime<Utc>> {
        self.actual_end_date.as_deref().and_then(parse_date)
    }
}

// ── Lenient field decoders ──────────────────────────────────────

fn lenient_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<ProjectId>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(ProjectId::Int(i)),
            None => Some(ProjectId::Text(n.to_string())),
        },
        Value::String(s) if !s.trim().is_empty() => Some(ProjectId::Text(s)),
        _ => None,
    })
}

/// Strings pass through, `null` becomes `None`, anything else keeps its JSON
/// text (which then fails date parsing rather than the whole record).
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn lenient_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// DECIMAL columns arrive as numbers or numeric strings.
fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}
