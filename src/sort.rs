//! Row ordering within a station.
//!
//! Text keys compare lowercased. The cabin key is the first run of digits in
//! the cabin field read as a number (`"A12"` → 12, `"B5"` → 5); cabins with no
//! digits sort as 0. Sorting is stable in both directions: descending order
//! reverses the comparator, not the output, so equal keys keep input order.

use crate::config::{SortBy, SortConfig, SortDirection};
use crate::types::Row;
use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit pattern must compile"));

/// Numeric value of the first digit run in a cabin field, 0 if none.
pub fn cabin_number(cabin: &str) -> f64 {
    DIGIT_RUN
        .find(cabin)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Return a sorted copy of `rows`. The input slice is never reordered.
pub fn sort_rows(rows: &[Row], sort: &SortConfig) -> Vec<Row> {
    let mut sorted = rows.to_vec();
    if sort.by == SortBy::Original {
        return sorted;
    }

    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, sort.by);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

fn compare(a: &Row, b: &Row, by: SortBy) -> Ordering {
    match by {
        SortBy::Original => Ordering::Equal,
        SortBy::Name => compare_text(&a.person_names, &b.person_names),
        SortBy::Company => compare_text(&a.company, &b.company),
        SortBy::Role => compare_text(&a.role, &b.role),
        SortBy::Cabin => cabin_number(&a.cabin).total_cmp(&cabin_number(&b.cabin)),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
