//! The visible-list pipeline: suppress, search, budget, dates, status, sort.
//!
//! Stages run in that fixed order over borrowed records. The input slice is
//! never reordered or modified; the result is a fresh `Vec` of references.

use tracing::debug;

use super::compare::compare_by;
use super::query::{DateBound, FilterConfig, SortKey, SortOrder};
use crate::project::Project;
use crate::status::StatusValue;

/// Compute the ordered, filtered subset of `all` to display.
///
/// Total over its inputs: absent fields, unparsable dates, and unknown
/// statuses take their documented defaults. With `sort_by` or `sort_order`
/// missing, the surviving projects keep their input order.
pub fn visible_projects<'a>(
    all: &'a [Project],
    filters: &FilterConfig,
    search: &str,
    sort_by: Option<SortKey>,
    sort_order: Option<SortOrder>,
) -> Vec<&'a Project> {
    let status_filter = filters.status_filter();
    let needle = search.trim().to_lowercase();
    let start_bound = filters.start_bound();
    let end_bound = filters.end_bound();

    let mut visible: Vec<&Project> = all
        .iter()
        .filter(|p| passes_default_visibility(p, status_filter))
        .filter(|p| matches_search(p, &needle))
        .filter(|p| within_budget(p, filters.min_budget, filters.max_budget))
        .filter(|p| within_dates(p, start_bound, end_bound))
        .filter(|p| status_filter.map_or(true, |s| &p.status == s))
        .collect();

    if let (Some(key), Some(order)) = (sort_by, sort_order) {
        // `sort_by` is stable; reversing the comparator keeps ties in input order.
        visible.sort_by(|a, b| {
            let ord = compare_by(key, a, b);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
    }

    debug!(
        total = all.len(),
        visible = visible.len(),
        sort_by = sort_by.map(SortKey::as_str),
        "recomputed project list"
    );
    visible
}

/// Cancelled and archived projects stay hidden unless the status filter
/// names their status.
fn passes_default_visibility(p: &Project, status_filter: Option<&StatusValue>) -> bool {
    !p.status.is_terminal() || status_filter == Some(&p.status)
}

/// `needle` is already trimmed and lower-cased; empty matches everything.
fn matches_search(p: &Project, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [
        Some(p.name.as_str()),
        p.location.as_deref(),
        p.description.as_deref(),
    ]
    .into_iter()
    .map(Option::unwrap_or_default)
    .any(|field| field.to_lowercase().contains(needle))
}

fn within_budget(p: &Project, min: Option<f64>, max: Option<f64>) -> bool {
    let budget = p.budget_or_zero();
    min.map_or(true, |min| budget >= min) && max.map_or(true, |max| budget <= max)
}

fn within_dates(p: &Project, start: Option<DateBound>, end: Option<DateBound>) -> bool {
    let start_ok = match start {
        None => true,
        Some(DateBound::Unparsable) => false,
        Some(DateBound::At(bound)) => p.start().is_some_and(|s| s >= bound),
    };
    let end_ok = match end {
        None => true,
        Some(DateBound::Unparsable) => false,
        Some(DateBound::At(bound)) => p.end().is_some_and(|e| e <= bound),
    };
    start_ok && end_ok
}
