//! State and ZIP normalization.
//!
//! Every resolver returns a `&'static str` from [`STATE_CODES`], so a resolved
//! code is always one of the 50 states, DC, or the five inhabited territories.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

pub const STATE_CODES: [&str; 56] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC", "PR", "VI", "GU", "AS", "MP",
];

const STATE_NAMES: &[(&str, &str)] = &[
    ("ALABAMA", "AL"),
    ("ALASKA", "AK"),
    ("ARIZONA", "AZ"),
    ("ARKANSAS", "AR"),
    ("CALIFORNIA", "CA"),
    ("COLORADO", "CO"),
    ("CONNECTICUT", "CT"),
    ("DELAWARE", "DE"),
    ("FLORIDA", "FL"),
    ("GEORGIA", "GA"),
    ("HAWAII", "HI"),
    ("IDAHO", "ID"),
    ("ILLINOIS", "IL"),
    ("INDIANA", "IN"),
    ("IOWA", "IA"),
    ("KANSAS", "KS"),
    ("KENTUCKY", "KY"),
    ("LOUISIANA", "LA"),
    ("MAINE", "ME"),
    ("MARYLAND", "MD"),
    ("MASSACHUSETTS", "MA"),
    ("MICHIGAN", "MI"),
    ("MINNESOTA", "MN"),
    ("MISSISSIPPI", "MS"),
    ("MISSOURI", "MO"),
    ("MONTANA", "MT"),
    ("NEBRASKA", "NE"),
    ("NEVADA", "NV"),
    ("NEW HAMPSHIRE", "NH"),
    ("NEW JERSEY", "NJ"),
    ("NEW MEXICO", "NM"),
    ("NEW YORK", "NY"),
    ("NORTH CAROLINA", "NC"),
    ("NORTH DAKOTA", "ND"),
    ("OHIO", "OH"),
    ("OKLAHOMA", "OK"),
    ("OREGON", "OR"),
    ("PENNSYLVANIA", "PA"),
    ("RHODE ISLAND", "RI"),
    ("SOUTH CAROLINA", "SC"),
    ("SOUTH DAKOTA", "SD"),
    ("TENNESSEE", "TN"),
    ("TEXAS", "TX"),
    ("UTAH", "UT"),
    ("VERMONT", "VT"),
    ("VIRGINIA", "VA"),
    ("WASHINGTON", "WA"),
    ("WEST VIRGINIA", "WV"),
    ("WISCONSIN", "WI"),
    ("WYOMING", "WY"),
    ("DISTRICT OF COLUMBIA", "DC"),
    ("WASHINGTON, DC", "DC"),
    ("PUERTO RICO", "PR"),
    ("VIRGIN ISLANDS", "VI"),
    ("GUAM", "GU"),
    ("AMERICAN SAMOA", "AS"),
    ("NORTHERN MARIANA ISLANDS", "MP"),
    ("CNMI", "MP"),
    ("MP", "MP"),
];

static NAME_TO_CODE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| STATE_NAMES.iter().copied().collect());

static ZIP_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{5})").expect("valid regex"));

/// Inclusive range over the numeric value of a five-digit ZIP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZipRange {
    pub start: u32,
    pub end: u32,
    pub code: &'static str,
}

impl ZipRange {
    const fn new(start: u32, end: u32, code: &'static str) -> Self {
        Self { start, end, code }
    }

    pub fn contains(&self, zip: u32) -> bool {
        (self.start..=self.end).contains(&zip)
    }
}

/// Resolution is first match in this order. The PR `6000..=7999` entry
/// overlaps CT and NJ and never wins; it is kept as-is because the intended
/// mapping for those prefixes is unknown.
pub const ZIP_RANGES: &[ZipRange] = &[
    ZipRange::new(35000, 36999, "AL"),
    ZipRange::new(99500, 99999, "AK"),
    ZipRange::new(85000, 86999, "AZ"),
    ZipRange::new(71600, 72999, "AR"),
    ZipRange::new(90000, 96199, "CA"),
    ZipRange::new(80000, 81699, "CO"),
    ZipRange::new(6000, 6999, "CT"),
    ZipRange::new(19700, 19999, "DE"),
    ZipRange::new(32000, 34999, "FL"),
    ZipRange::new(30000, 31999, "GA"),
    ZipRange::new(96700, 96999, "HI"),
    ZipRange::new(83200, 83999, "ID"),
    ZipRange::new(60000, 62999, "IL"),
    ZipRange::new(46000, 47999, "IN"),
    ZipRange::new(50000, 52999, "IA"),
    ZipRange::new(66000, 67999, "KS"),
    ZipRange::new(40000, 42799, "KY"),
    ZipRange::new(70000, 71599, "LA"),
    ZipRange::new(3900, 4999, "ME"),
    ZipRange::new(20600, 21999, "MD"),
    ZipRange::new(1000, 2799, "MA"),
    ZipRange::new(48000, 49999, "MI"),
    ZipRange::new(55000, 56799, "MN"),
    ZipRange::new(38600, 39999, "MS"),
    ZipRange::new(63000, 65999, "MO"),
    ZipRange::new(59000, 59999, "MT"),
    ZipRange::new(68000, 69399, "NE"),
    ZipRange::new(88900, 89899, "NV"),
    ZipRange::new(3000, 3899, "NH"),
    ZipRange::new(7000, 8999, "NJ"),
    ZipRange::new(87000, 88499, "NM"),
    ZipRange::new(10000, 14999, "NY"),
    ZipRange::new(27000, 28999, "NC"),
    ZipRange::new(58000, 58899, "ND"),
    ZipRange::new(43000, 45999, "OH"),
    ZipRange::new(73000, 74999, "OK"),
    ZipRange::new(97000, 97999, "OR"),
    ZipRange::new(15000, 19699, "PA"),
    ZipRange::new(2800, 2999, "RI"),
    ZipRange::new(29000, 29999, "SC"),
    ZipRange::new(57000, 57799, "SD"),
    ZipRange::new(37000, 38599, "TN"),
    ZipRange::new(75000, 79999, "TX"),
    ZipRange::new(88500, 88599, "TX"),
    ZipRange::new(84000, 84799, "UT"),
    ZipRange::new(500, 599, "VT"),
    ZipRange::new(5600, 5999, "VT"),
    ZipRange::new(20100, 20199, "VA"),
    ZipRange::new(22000, 24699, "VA"),
    ZipRange::new(98000, 99499, "WA"),
    ZipRange::new(24700, 26899, "WV"),
    ZipRange::new(53000, 54999, "WI"),
    ZipRange::new(82000, 83199, "WY"),
    ZipRange::new(20000, 20599, "DC"),
    ZipRange::new(56900, 56999, "DC"),
    ZipRange::new(600, 799, "PR"),
    ZipRange::new(900, 999, "PR"),
    ZipRange::new(6000, 7999, "PR"),
    ZipRange::new(800, 899, "VI"),
    ZipRange::new(96799, 96799, "AS"),
    ZipRange::new(96910, 96932, "GU"),
    ZipRange::new(96950, 96952, "MP"),
];

pub fn is_state_code(code: &str) -> bool {
    STATE_CODES.contains(&code)
}

/// Normalizes a full state/territory name or a two-letter code.
///
/// `""`, `"-"` and `"na"` (any case) mean "no state" and return `None`, as
/// does anything that is neither a known name nor a known code.
pub fn resolve_state_code(input: &str) -> Option<&'static str> {
    let s = input.trim();
    if s.is_empty() || s == "-" || s.eq_ignore_ascii_case("na") {
        return None;
    }

    let upper = s.to_uppercase();
    if let Some(code) = NAME_TO_CODE.get(upper.as_str()) {
        return Some(*code);
    }
    if let Some(code) = STATE_CODES.iter().find(|c| **c == upper) {
        return Some(*code);
    }

    NAME_TO_CODE.get(title_case(s).as_str()).copied()
}

/// Maps the leading five digits of `zip` to a state code.
pub fn resolve_zip_to_state(zip: &str) -> Option<&'static str> {
    let caps = ZIP_PREFIX.captures(zip.trim())?;
    let value: u32 = caps[1].parse().ok()?;
    ZIP_RANGES
        .iter()
        .find(|range| range.contains(value))
        .map(|range| range.code)
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        let is_word = ch.is_alphanumeric() || ch == '_';
        if is_word && at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !is_word;
    }
    out
}
