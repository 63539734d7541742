//! # Timeline: Schedule Progress Helpers
//!
//! Elapsed-time progress, days remaining, and scheduled duration for a
//! project's planned window. Callers pass `now` explicitly so results are
//! reproducible; none of these functions fail.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::project::Project;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Percentage of the planned window that has elapsed, clamped to `0..=100`.
///
/// Returns 0 when either end of the window is unknown. A window with no
/// length counts as fully elapsed once `now` reaches its end.
pub fn timeline_progress(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> f64 {
    let (Some(start), Some(end)) = (start, end) else {
        return 0.0;
    };
    let span = (end - start).num_milliseconds();
    if span <= 0 {
        return if now >= end { 100.0 } else { 0.0 };
    }
    let elapsed = (now - start).num_milliseconds();
    (elapsed as f64 / span as f64 * 100.0).clamp(0.0, 100.0)
}

/// Whole days until `end`, rounded up. Negative once the project is overdue.
pub fn days_remaining(end: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<i64> {
    let end = end?;
    let ms = (end - now).num_milliseconds();
    Some((ms as f64 / MS_PER_DAY).ceil() as i64)
}

/// Planned duration in whole days.
pub fn scheduled_duration_days(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Option<i64> {
    Some((end? - start?).num_days())
}

/// Timeline figures for one project at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSummary {
    pub progress_pct: f64,
    pub days_remaining: Option<i64>,
    pub scheduled_days: Option<i64>,
    pub overdue: bool,
}

impl TimelineSummary {
    pub fn for_project(project: &Project, now: DateTime<Utc>) -> Self {
        let start = project.start();
        let end = project.end();
        let days_remaining = days_remaining(end, now);
        TimelineSummary {
            progress_pct: timeline_progress(start, end, now),
            days_remaining,
            scheduled_days: scheduled_duration_days(start, end),
            overdue: days_remaining.is_some_and(|d| d < 0),
        }
    }
}
