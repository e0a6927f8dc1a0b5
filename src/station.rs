//! Station code extraction.
//!
//! Muster-station fields are free text (`"LB5 - Deck 3 PS"`, `"lb12"`,
//! `"Muster at LB2"`). The canonical station is the first case-insensitive
//! `LB<digits>` token, normalized to an uppercase `LB` prefix with the digits
//! kept verbatim. Fields with no such token belong to no station.

use crate::types::StationCode;
use regex::Regex;
use std::sync::LazyLock;

static STATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)LB(\d+)").expect("station pattern must compile"));

/// Extract the canonical station code from a raw muster-station field.
///
/// ```
/// use muster_report::station::extract_station_code;
///
/// let code = extract_station_code("LB5 - Deck 3 PS").unwrap();
/// assert_eq!(code.as_str(), "LB5");
/// assert!(extract_station_code("Deck Office").is_none());
/// ```
pub fn extract_station_code(raw: &str) -> Option<StationCode> {
    STATION_PATTERN
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|digits| StationCode(format!("LB{}", digits.as_str())))
}

/// Label shown in the "LB Station" output column: the code if one is found,
/// otherwise the raw field unchanged.
pub fn station_label(raw: &str) -> String {
    match extract_station_code(raw) {
        Some(code) => code.0,
        None => raw.to_string(),
    }
}

/// `LB1` through `LB7`.
pub fn default_station_codes() -> Vec<StationCode> {
    (1..=7).map(|n| StationCode(format!("LB{n}"))).collect()
}
