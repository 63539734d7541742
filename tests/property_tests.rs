//! Property-based tests for the project list engine.
//!
//! Random project lists and queries are pushed through `visible_projects`
//! and checked against invariants that must hold for every input, not just
//! the hand-picked cases in the unit tests.
//!
//! # How to run
//!
//! ```bash
//! cargo test --test property_tests
//! PROPTEST_CASES=10000 cargo test --test property_tests
//! ```
//!
//! Each property is named `prop_<area>_<invariant>`.

use chrono::{TimeZone, Utc};
use linework::status::STATUS_TABLE;
use linework::timeline::{days_remaining, timeline_progress};
use linework::{visible_projects, FilterConfig, Project, ProjectId, SortKey, SortOrder, StatusValue};
use proptest::prelude::*;

// == Strategies ================================================================

fn status_strategy() -> impl Strategy<Value = StatusValue> {
    prop_oneof![
        4 => (0..STATUS_TABLE.len()).prop_map(|i| StatusValue::Known(STATUS_TABLE[i].status)),
        1 => Just(StatusValue::Unknown("in_progress".into())),
        1 => Just(StatusValue::default()),
    ]
}

fn date_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        4 => (2023i32..2027, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| Some(format!("{:04}-{:02}-{:02}", y, m, d))),
        1 => Just(None),
        1 => Just(Some("TBD".to_string())),
    ]
}

fn project_strategy() -> impl Strategy<Value = Project> {
    (
        "[A-Za-z ]{0,12}",
        proptest::option::of("[A-Za-z ]{0,10}"),
        status_strategy(),
        proptest::option::of(0.0f64..2_000_000.0),
        date_strategy(),
        date_strategy(),
    )
        .prop_map(|(name, location, status, budget, start, end)| {
            let mut p = Project::new(name, status);
            p.location = location;
            p.estimated_budget = budget;
            p.start_date = start;
            p.end_date = end;
            p
        })
}

/// Projects with their input position as id, so order can be traced.
fn projects_strategy() -> impl Strategy<Value = Vec<Project>> {
    proptest::collection::vec(project_strategy(), 0..40).prop_map(|mut v| {
        for (i, p) in v.iter_mut().enumerate() {
            p.id = Some(ProjectId::Int(i as i64));
        }
        v
    })
}

fn filters_strategy() -> impl Strategy<Value = FilterConfig> {
    (
        proptest::option::of(0.0f64..1_000_000.0),
        proptest::option::of(500_000.0f64..2_000_000.0),
        date_strategy(),
        date_strategy(),
        proptest::option::of(status_strategy()),
    )
        .prop_map(|(min_budget, max_budget, start_date, end_date, status)| FilterConfig {
            min_budget,
            max_budget,
            start_date,
            end_date,
            status,
        })
}

fn sort_strategy() -> impl Strategy<Value = (Option<SortKey>, Option<SortOrder>)> {
    (
        proptest::option::of((0..SortKey::ALL.len()).prop_map(|i| SortKey::ALL[i])),
        proptest::option::of(prop_oneof![Just(SortOrder::Ascending), Just(SortOrder::Descending)]),
    )
}

fn ids(list: &[&Project]) -> Vec<i64> {
    list.iter()
        .map(|p| match p.id {
            Some(ProjectId::Int(i)) => i,
            _ => -1,
        })
        .collect()
}

// == Engine Properties =========================================================

proptest! {
    /// The result never contains a project that was not in the input, and
    /// never repeats one.
    #[test]
    fn prop_engine_output_is_subset(
        all in projects_strategy(),
        filters in filters_strategy(),
        search in "[a-z ]{0,4}",
        (key, order) in sort_strategy(),
    ) {
        let out = ids(&visible_projects(&all, &filters, &search, key, order));
        let mut seen = std::collections::HashSet::new();
        for id in &out {
            prop_assert!(*id >= 0 && (*id as usize) < all.len());
            prop_assert!(seen.insert(*id));
        }
    }

    /// Running the engine over its own output changes nothing.
    #[test]
    fn prop_engine_idempotent(
        all in projects_strategy(),
        filters in filters_strategy(),
        search in "[a-z ]{0,4}",
        (key, order) in sort_strategy(),
    ) {
        let first: Vec<Project> = visible_projects(&all, &filters, &search, key, order)
            .into_iter()
            .cloned()
            .collect();
        let second = visible_projects(&first, &filters, &search, key, order);
        prop_assert_eq!(ids(&first.iter().collect::<Vec<_>>()), ids(&second));
    }

    /// Without a sort key or direction, input order is preserved.
    #[test]
    fn prop_engine_unsorted_keeps_input_order(
        all in projects_strategy(),
        filters in filters_strategy(),
        key in proptest::option::of(Just(SortKey::Name)),
    ) {
        let out = ids(&visible_projects(&all, &filters, "", key, None));
        let mut sorted = out.clone();
        sorted.sort_unstable();
        prop_assert_eq!(out, sorted);
    }

    /// Cancelled and archived projects appear only when the status filter
    /// names their status exactly.
    #[test]
    fn prop_engine_terminal_only_when_selected(
        all in projects_strategy(),
        filters in filters_strategy(),
    ) {
        let out = visible_projects(&all, &filters, "", None, None);
        for p in out {
            if p.status.is_terminal() {
                prop_assert_eq!(filters.status_filter(), Some(&p.status));
            }
        }
    }

    /// Equal sort keys keep their input order (stable sort).
    #[test]
    fn prop_engine_sort_is_stable(all in projects_strategy()) {
        let out = visible_projects(
            &all,
            &FilterConfig::default(),
            "",
            Some(SortKey::Status),
            Some(SortOrder::Ascending),
        );
        for pair in out.windows(2) {
            if pair[0].status.sort_rank() == pair[1].status.sort_rank() {
                prop_assert!(ids(&[pair[0]])[0] < ids(&[pair[1]])[0]);
            }
        }
    }

    /// Descending is the exact reverse of ascending when all keys differ.
    #[test]
    fn prop_engine_descending_reverses_distinct_budgets(
        budgets in proptest::collection::hash_set(0u32..1_000_000, 0..30),
    ) {
        let all: Vec<Project> = budgets
            .into_iter()
            .enumerate()
            .map(|(i, b)| {
                let mut p = Project::new(format!("p{}", i), linework::ProjectStatus::Planning);
                p.id = Some(ProjectId::Int(i as i64));
                p.estimated_budget = Some(b as f64);
                p
            })
            .collect();
        let f = FilterConfig::default();
        let by_budget = |order| visible_projects(&all, &f, "", Some(SortKey::Budget), Some(order));
        let asc = ids(&by_budget(SortOrder::Ascending));
        let mut desc = ids(&by_budget(SortOrder::Descending));
        desc.reverse();
        prop_assert_eq!(asc, desc);
    }
}

// == Timeline Properties =======================================================

proptest! {
    /// Progress is always a percentage.
    #[test]
    fn prop_timeline_progress_bounded(
        start_days in -2000i64..2000,
        len_days in -100i64..2000,
        now_days in -4000i64..4000,
    ) {
        let epoch = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let start = epoch + chrono::Duration::days(start_days);
        let end = start + chrono::Duration::days(len_days);
        let now = epoch + chrono::Duration::days(now_days);
        let pct = timeline_progress(Some(start), Some(end), now);
        prop_assert!((0.0..=100.0).contains(&pct));
    }

    /// Whole-day offsets give exactly that many days remaining.
    #[test]
    fn prop_timeline_days_remaining_whole_days(offset in -3000i64..3000) {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap();
        let end = now + chrono::Duration::days(offset);
        prop_assert_eq!(days_remaining(Some(end), now), Some(offset));
    }
}
