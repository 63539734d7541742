//! # Status: Project Lifecycle Status Table
//!
//! The closed set of twelve lifecycle statuses a project moves through, from
//! planning to archival. Each status carries its display label, badge colors,
//! a one-line description, and a fixed position in the lifecycle order used
//! by status sorting.
//!
//! Records decoded from the API may carry a status outside this set (older
//! backends emit `in_progress` or `completed`). Those are kept verbatim as
//! [`StatusValue::Unknown`] and always order after every known status.
//!
//! Cancelled and archived are **terminal**: the project list hides them
//! unless a status filter asks for them explicitly.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the twelve lifecycle statuses, declared in lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    Initiated,
    RegulatoryScoping,
    DesignProcurement,
    ConstructionPrep,
    InConstruction,
    Commissioning,
    Energized,
    Closeout,
    OnHold,
    Cancelled,
    Archived,
}

/// Display metadata for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusInfo {
    pub status: ProjectStatus,
    pub value: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub bg_color: &'static str,
    pub border_color: &'static str,
    pub description: &'static str,
    /// Position in the lifecycle order, 1-based.
    pub sort_order: u8,
}

const fn info(
    status: ProjectStatus,
    value: &'static str,
    label: &'static str,
    color: &'static str,
    bg_color: &'static str,
    description: &'static str,
    sort_order: u8,
) -> StatusInfo {
    StatusInfo {
        status,
        value,
        label,
        color,
        bg_color,
        border_color: color,
        description,
        sort_order,
    }
}

/// All statuses in lifecycle order.
#[rustfmt::skip]
pub const STATUS_TABLE: [StatusInfo; 12] = [
    info(ProjectStatus::Planning, "planning", "Planning", "#9333ea", "#f3e8ff", "Initial project planning phase", 1),
    info(ProjectStatus::Initiated, "initiated", "Initiated", "#3b82f6", "#dbeafe", "Project has been approved and initiated", 2),
    info(ProjectStatus::RegulatoryScoping, "regulatory_scoping", "Regulatory & Scoping", "#0891b2", "#cffafe", "Obtaining permits and defining project scope", 3),
    info(ProjectStatus::DesignProcurement, "design_procurement", "Design & Procurement", "#059669", "#d1fae5", "Design finalization and material procurement", 4),
    info(ProjectStatus::ConstructionPrep, "construction_prep", "Construction Prep", "#84cc16", "#ecfccb", "Site preparation and mobilization", 5),
    info(ProjectStatus::InConstruction, "in_construction", "In Construction", "#f59e0b", "#fef3c7", "Active construction phase", 6),
    info(ProjectStatus::Commissioning, "commissioning", "Commissioning", "#f97316", "#ffedd5", "Testing and system commissioning", 7),
    info(ProjectStatus::Energized, "energized", "Energized", "#10b981", "#d1fae5", "System energized and operational", 8),
    info(ProjectStatus::Closeout, "closeout", "Closeout", "#06b6d4", "#cffafe", "Final documentation and project closeout", 9),
    info(ProjectStatus::OnHold, "on_hold", "On Hold", "#eab308", "#fef9c3", "Project temporarily paused", 10),
    info(ProjectStatus::Cancelled, "cancelled", "Cancelled", "#ef4444", "#fee2e2", "Project cancelled", 11),
    info(ProjectStatus::Archived, "archived", "Archived", "#6b7280", "#f3f4f6", "Project archived", 12),
];

/// Rank given to statuses outside the table; sorts after every known status.
pub const UNKNOWN_STATUS_RANK: u8 = 13;

impl ProjectStatus {
    pub fn info(self) -> &'static StatusInfo {
        // Declaration order matches table order.
        &STATUS_TABLE[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        self.info().value
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn sort_order(self) -> u8 {
        self.info().sort_order
    }

    /// Cancelled and archived projects are hidden by default.
    pub fn is_terminal(self) -> bool {
        matches!(self, ProjectStatus::Cancelled | ProjectStatus::Archived)
    }

    /// Look up a status by its wire value. Surrounding whitespace and ASCII
    /// case are ignored.
    pub fn from_value(value: &str) -> Option<ProjectStatus> {
        let value = value.trim();
        STATUS_TABLE
            .iter()
            .find(|s| s.value.eq_ignore_ascii_case(value))
            .map(|s| s.status)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectStatus::from_value(s).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown status '{}'. Valid statuses: {}",
                s,
                all_statuses()
                    .iter()
                    .map(|s| s.value)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
    }
}

/// Every status, including terminal ones.
pub fn all_statuses() -> &'static [StatusInfo] {
    &STATUS_TABLE
}

/// Statuses shown by default (everything except cancelled and archived).
pub fn active_statuses() -> Vec<&'static StatusInfo> {
    STATUS_TABLE
        .iter()
        .filter(|s| !s.status.is_terminal())
        .collect()
}

pub fn terminal_statuses() -> Vec<&'static StatusInfo> {
    STATUS_TABLE
        .iter()
        .filter(|s| s.status.is_terminal())
        .collect()
}

/// A status as it appears on a project record: either a member of the
/// closed set or an unrecognised raw string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusValue {
    Known(ProjectStatus),
    Unknown(String),
}

impl StatusValue {
    /// Classify a raw status string. Never fails.
    pub fn parse(raw: &str) -> StatusValue {
        match ProjectStatus::from_value(raw) {
            Some(status) => StatusValue::Known(status),
            None => StatusValue::Unknown(raw.to_string()),
        }
    }

    pub fn known(&self) -> Option<ProjectStatus> {
        match self {
            StatusValue::Known(status) => Some(*status),
            StatusValue::Unknown(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StatusValue::Known(status) => status.as_str(),
            StatusValue::Unknown(raw) => raw,
        }
    }

    /// Position in the lifecycle order; unknown statuses share the rank after
    /// the last known one, so a stable sort keeps them in input order.
    pub fn sort_rank(&self) -> u8 {
        match self {
            StatusValue::Known(status) => status.sort_order(),
            StatusValue::Unknown(_) => UNKNOWN_STATUS_RANK,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.known().is_some_and(ProjectStatus::is_terminal)
    }

    /// Badge label; unknown statuses display their raw value.
    pub fn label(&self) -> &str {
        match self {
            StatusValue::Known(status) => status.label(),
            StatusValue::Unknown(raw) => raw,
        }
    }
}

impl Default for StatusValue {
    fn default() -> Self {
        StatusValue::Unknown(String::new())
    }
}

impl From<ProjectStatus> for StatusValue {
    fn from(status: ProjectStatus) -> Self {
        StatusValue::Known(status)
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StatusValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StatusValue {
    /// A `null`, missing, or non-string status decodes as an empty unknown
    /// status.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(raw) => StatusValue::parse(&raw),
            _ => StatusValue::default(),
        })
    }
}
