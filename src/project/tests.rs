//! Unit tests for project record decoding.

use super::*;
use crate::status::{ProjectStatus, StatusValue};
use chrono::{TimeZone, Utc};

#[test]
fn decode_backend_record() {
    let json = r#"{
        "id": 17,
        "name": "Cedar Creek Substation",
        "description": "Substation Upgrade and relay replacement",
        "location": "Cedar Creek, OR",
        "startDate": "2025-02-01",
        "endDate": "2025-11-30",
        "actualStartDate": null,
        "actualEndDate": null,
        "status": "in_construction",
        "priority": "high",
        "estimatedBudget": 1250000.0,
        "actualCost": null,
        "projectManagerId": 4,
        "createdAt": "2025-01-10T09:15:00"
    }"#;
    let p: Project = serde_json::from_str(json).unwrap();
    assert_eq!(p.id, Some(ProjectId::Int(17)));
    assert_eq!(p.name, "Cedar Creek Substation");
    assert_eq!(p.status, StatusValue::Known(ProjectStatus::InConstruction));
    assert_eq!(p.estimated_budget, Some(1_250_000.0));
    assert_eq!(p.actual_cost, None);
    assert_eq!(p.priority.as_deref(), Some("high"));
    assert_eq!(
        p.start(),
        Some(Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(p.actual_start(), None);
    assert_eq!(p.extra.get("projectManagerId"), Some(&serde_json::json!(4)));
    assert!(p.extra.contains_key("createdAt"));
}

#[test]
fn decode_sparse_record_uses_defaults() {
    let p: Project = serde_json::from_str("{}").unwrap();
    assert_eq!(p.id, None);
    assert_eq!(p.name, "");
    assert_eq!(p.location, None);
    assert_eq!(p.status, StatusValue::Unknown(String::new()));
    assert_eq!(p.budget_or_zero(), 0.0);
    assert_eq!(p.start(), None);
    assert!(p.extra.is_empty());
}

#[test]
fn decode_malformed_fields_degrade() {
    let json = r#"{
        "id": "LR-204",
        "name": null,
        "status": "completed",
        "estimatedBudget": "75000.50",
        "actualCost": "n/a",
        "startDate": 20250101,
        "endDate": "sometime in spring"
    }"#;
    let p: Project = serde_json::from_str(json).unwrap();
    assert_eq!(p.id, Some(ProjectId::Text("LR-204".into())));
    assert_eq!(p.name, "");
    assert_eq!(p.status, StatusValue::Unknown("completed".into()));
    assert_eq!(p.estimated_budget, Some(75_000.5));
    assert_eq!(p.actual_cost, None);
    assert_eq!(p.start_date.as_deref(), Some("20250101"));
    assert_eq!(p.start(), None);
    assert_eq!(p.end(), None);
}

#[test]
fn non_integer_and_blank_ids() {
    let p: Project = serde_json::from_str(r#"{"id": 3.5}"#).unwrap();
    assert_eq!(p.id, Some(ProjectId::Text("3.5".into())));
    let p: Project = serde_json::from_str(r#"{"id": "  "}"#).unwrap();
    assert_eq!(p.id, None);
    assert_eq!(ProjectId::Int(9).to_string(), "9");
}

#[test]
fn passthrough_fields_survive_reserialization() {
    let json = r#"{"id":1,"name":"Line Rebuild","status":"planning","crewSize":12}"#;
    let p: Project = serde_json::from_str(json).unwrap();
    let out = serde_json::to_value(&p).unwrap();
    assert_eq!(out["crewSize"], 12);
    assert_eq!(out["status"], "planning");
    assert_eq!(out["id"], 1);
}

#[test]
fn new_builds_named_record() {
    let p = Project::new("Feeder 12", ProjectStatus::Planning);
    assert_eq!(p.name, "Feeder 12");
    assert_eq!(p.status.known(), Some(ProjectStatus::Planning));
}
