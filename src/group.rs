//! Station grouping.
//!
//! Partitions the occupied rows of a [`Dataset`] into one [`Bucket`] per
//! requested station code. The grouped view is always rebuilt from scratch;
//! nothing is carried over between calls.
//!
//! Rows are dropped from the grouped view when they are not occupied, when
//! their muster-station field has no `LB<digits>` token, or when the token is
//! not one of the requested stations. Dropped occupied rows are still visible
//! through [`GroupedDataset::unassigned_row_count`].

use crate::station::extract_station_code;
use crate::types::{Dataset, Row, StationCode};
use log::{debug, warn};
use std::collections::HashMap;

/// Occupied rows belonging to one station, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub station: StationCode,
    pub rows: Vec<Row>,
}

/// Rows partitioned by station, plus the source dataset's counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedDataset {
    /// One bucket per requested station, in request order, empty ones included.
    pub buckets: Vec<Bucket>,
    pub total_row_count: usize,
    pub occupied_row_count: usize,
}

impl GroupedDataset {
    pub fn bucket(&self, station: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.station.as_str() == station)
    }

    pub fn non_empty(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter().filter(|b| !b.rows.is_empty())
    }

    pub fn assigned_row_count(&self) -> usize {
        self.buckets.iter().map(|b| b.rows.len()).sum()
    }

    /// Occupied rows that landed in no bucket.
    pub fn unassigned_row_count(&self) -> usize {
        self.occupied_row_count - self.assigned_row_count()
    }

    pub fn stations(&self) -> Vec<StationCode> {
        self.buckets.iter().map(|b| b.station.clone()).collect()
    }

    /// All bucketed rows, bucket after bucket.
    pub fn flatten(&self) -> Vec<Row> {
        self.buckets
            .iter()
            .flat_map(|b| b.rows.iter().cloned())
            .collect()
    }
}

/// Group the occupied rows of `dataset` by station.
///
/// Duplicate codes in `stations` collapse onto their first occurrence.
pub fn group(dataset: &Dataset, stations: &[StationCode]) -> GroupedDataset {
    let mut buckets: Vec<Bucket> = Vec::with_capacity(stations.len());
    let mut index: HashMap<&StationCode, usize> = HashMap::new();
    for code in stations {
        if index.contains_key(code) {
            warn!("station {code} requested more than once; keeping the first");
            continue;
        }
        index.insert(code, buckets.len());
        buckets.push(Bucket {
            station: code.clone(),
            rows: Vec::new(),
        });
    }

    for row in dataset.rows.iter().filter(|r| r.status.is_occupied()) {
        let slot = extract_station_code(&row.muster_station_raw)
            .and_then(|code| index.get(&code).copied());
        match slot {
            Some(i) => buckets[i].rows.push(row.clone()),
            None => debug!(
                "row '{}' has no known station ('{}')",
                row.person_names, row.muster_station_raw
            ),
        }
    }

    GroupedDataset {
        buckets,
        total_row_count: dataset.total_row_count(),
        occupied_row_count: dataset.occupied_row_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::default_station_codes;
    use crate::test_helpers::{bucket_names, row, sample_dataset};

    #[test]
    fn every_station_gets_a_bucket() {
        let grouped = group(&sample_dataset(), &default_station_codes());
        let codes: Vec<String> = grouped.stations().iter().map(|c| c.to_string()).collect();
        assert_eq!(codes, ["LB1", "LB2", "LB3", "LB4", "LB5", "LB6", "LB7"]);
        assert!(grouped.bucket("LB7").unwrap().rows.is_empty());
    }

    #[test]
    fn only_occupied_rows_are_grouped() {
        let dataset = Dataset::new(vec![
            row("Jane", "LB1", "Occupied"),
            row("John", "LB1", "Vacant"),
            row("Ann", "LB1", "OCCUPIED"),
        ]);
        let grouped = group(&dataset, &default_station_codes());
        assert_eq!(bucket_names(&grouped, "LB1"), ["Jane", "Ann"]);
        assert_eq!(grouped.total_row_count, 3);
        assert_eq!(grouped.occupied_row_count, 2);
    }

    #[test]
    fn rows_without_station_are_counted_but_not_grouped() {
        let dataset = Dataset::new(vec![
            row("Jane", "LB1", "Occupied"),
            row("Office", "Deck Office", "Occupied"),
            row("Far", "LB9", "Occupied"),
        ]);
        let grouped = group(&dataset, &default_station_codes());
        assert_eq!(grouped.occupied_row_count, 3);
        assert_eq!(grouped.assigned_row_count(), 1);
        assert_eq!(grouped.unassigned_row_count(), 2);
        assert!(
            grouped
                .flatten()
                .iter()
                .all(|r| r.person_names != "Office")
        );
    }

    #[test]
    fn free_text_station_field_is_normalized() {
        let dataset = Dataset::new(vec![
            row("Jane", "lb5 - Deck 3 PS", "Occupied"),
            row("John", "LB5", "Occupied"),
        ]);
        let grouped = group(&dataset, &default_station_codes());
        assert_eq!(bucket_names(&grouped, "LB5"), ["Jane", "John"]);
    }

    #[test]
    fn grouping_is_idempotent() {
        let stations = default_station_codes();
        let grouped = group(&sample_dataset(), &stations);
        let regrouped = group(&Dataset::new(grouped.flatten()), &stations);
        assert_eq!(grouped.buckets, regrouped.buckets);
    }

    #[test]
    fn requested_order_is_kept() {
        let stations: Vec<StationCode> = ["LB3", "LB1"]
            .iter()
            .filter_map(|s| extract_station_code(s))
            .collect();
        let grouped = group(&sample_dataset(), &stations);
        let codes: Vec<&str> = grouped.buckets.iter().map(|b| b.station.as_str()).collect();
        assert_eq!(codes, ["LB3", "LB1"]);
    }

    #[test]
    fn duplicate_station_codes_collapse() {
        let stations: Vec<StationCode> = ["LB1", "LB2", "lb1"]
            .iter()
            .filter_map(|s| extract_station_code(s))
            .collect();
        let grouped = group(&sample_dataset(), &stations);
        assert_eq!(grouped.buckets.len(), 2);
    }

    #[test]
    fn empty_dataset_still_has_buckets() {
        let grouped = group(&Dataset::default(), &default_station_codes());
        assert_eq!(grouped.buckets.len(), 7);
        assert_eq!(grouped.non_empty().count(), 0);
    }
}
