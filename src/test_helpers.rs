//! Shared test utilities for the muster-report test suite.
//!
//! Provides row builders, a small sample roster, and lookup helpers that
//! panic with a clear message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let grouped = group(&sample_dataset(), &default_station_codes());
//! assert_eq!(bucket_names(&grouped, "LB1"), ["Jane Doe", "Ola Nordmann"]);
//!
//! let nortrans = row("Kari", "LB2", "Occupied").with_company("Nortrans");
//! ```

use crate::group::GroupedDataset;
use crate::types::{Dataset, Row, RowStatus};

// =========================================================================
// Row builders
// =========================================================================

/// Row with placeholder values for everything except name, station and status.
pub fn row(name: &str, station: &str, status: &str) -> Row {
    Row {
        person_names: name.to_string(),
        role: "Crew".to_string(),
        company: "Acme".to_string(),
        cabin: "100".to_string(),
        bunk: "A".to_string(),
        muster_station_raw: station.to_string(),
        status: RowStatus::parse(status),
    }
}

/// Chainable field overrides for test rows.
pub trait RowExt {
    fn with_company(self, company: &str) -> Row;
    fn with_role(self, role: &str) -> Row;
    fn with_cabin(self, cabin: &str) -> Row;
}

impl RowExt for Row {
    fn with_company(mut self, company: &str) -> Row {
        self.company = company.to_string();
        self
    }

    fn with_role(mut self, role: &str) -> Row {
        self.role = role.to_string();
        self
    }

    fn with_cabin(mut self, cabin: &str) -> Row {
        self.cabin = cabin.to_string();
        self
    }
}

// =========================================================================
// Sample data
// =========================================================================

/// Eight rows across LB1, LB2 and LB3, one vacant and one without a station.
pub fn sample_dataset() -> Dataset {
    Dataset::new(vec![
        row("Jane Doe", "LB1 - Deck 5 PS", "Occupied")
            .with_role("Captain")
            .with_cabin("A12"),
        row("Doe, Jane", "LB2", "Occupied").with_cabin("B5"),
        row("Smith, Nortrans", "LB2", "Occupied").with_company("Nortrans"),
        row("Kari Nordmann", "lb2 starboard", "Occupied")
            .with_company("NORTRANS")
            .with_cabin("A2"),
        row("Empty Bunk", "LB1", "Vacant"),
        row("Ola Nordmann", "LB1", "Occupied")
            .with_role("Cook")
            .with_cabin("C3"),
        row("Office Hand", "Deck Office", "Occupied"),
        row("Per Hansen", "LB3", "Occupied").with_role("Medic"),
    ])
}

// =========================================================================
// Lookups
// =========================================================================

/// Person names in row order.
pub fn names(rows: &[Row]) -> Vec<&str> {
    rows.iter().map(|r| r.person_names.as_str()).collect()
}

/// Person names in one bucket. Panics if the station has no bucket.
pub fn bucket_names<'a>(grouped: &'a GroupedDataset, station: &str) -> Vec<&'a str> {
    let bucket = grouped.bucket(station).unwrap_or_else(|| {
        let stations: Vec<String> = grouped.stations().iter().map(|s| s.to_string()).collect();
        panic!("bucket '{station}' not found. Available: {stations:?}")
    });
    names(&bucket.rows)
}
