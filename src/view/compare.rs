//! Per-column comparators for the project list.
//!
//! All comparators are total: missing values have a fixed place in the
//! order instead of being skipped.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::query::SortKey;
use crate::project::Project;

/// Letters that carry no canonical decomposition but collate with a base
/// letter.
fn fold_letter(c: char, key: &mut String) {
    match c {
        'ø' => key.push('o'),
        'đ' | 'ð' => key.push('d'),
        'ł' => key.push('l'),
        'ħ' => key.push('h'),
        'ı' => key.push('i'),
        'æ' => key.push_str("ae"),
        'œ' => key.push_str("oe"),
        'ß' => key.push_str("ss"),
        'þ' => key.push_str("th"),
        other => key.push(other),
    }
}

/// Lower-cased base letters with accents stripped: `Éclair` → `eclair`.
fn base_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for c in s
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
    {
        fold_letter(c, &mut key);
    }
    key
}

/// Locale-style string ordering, strongest level first:
///
/// 1. base letters, ignoring accents and case (`Éclair` sorts with `eclair`)
/// 2. accents, unaccented first
/// 3. case, lower before upper at the first position where only case differs
/// 4. code point
///
/// The empty string sorts first.
pub fn collate(a: &str, b: &str) -> Ordering {
    let primary = base_key(a).cmp(&base_key(b));
    if primary != Ordering::Equal {
        return primary;
    }
    let accents = a
        .nfd()
        .flat_map(char::to_lowercase)
        .cmp(b.nfd().flat_map(char::to_lowercase));
    if accents != Ordering::Equal {
        return accents;
    }
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            return match (ca.is_lowercase(), cb.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => ca.cmp(&cb),
            };
        }
    }
    a.cmp(b)
}

/// Chronological order; missing or unparsable dates go after every valid one.
pub fn compare_dates(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Ascending comparison of two projects on `key`.
pub fn compare_by(key: SortKey, a: &Project, b: &Project) -> Ordering {
    match key {
        SortKey::Name => collate(&a.name, &b.name),
        SortKey::Location => collate(
            a.location.as_deref().unwrap_or_default(),
            b.location.as_deref().unwrap_or_default(),
        ),
        SortKey::Budget => a.budget_or_zero().total_cmp(&b.budget_or_zero()),
        SortKey::StartDate => compare_dates(a.start(), b.start()),
        SortKey::EndDate => compare_dates(a.end(), b.end()),
        SortKey::Status => a.status.sort_rank().cmp(&b.status.sort_rank()),
    }
}
