use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use tracing::debug;

use super::non_blank;

/// A run of exactly four digits, not part of a longer number
static YEAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^0-9])([0-9]{4})(?:[^0-9]|$)")
        .expect("Invalid year regex")
});

/// Raw parts of a combined `price | year | mileage` field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailParts {
    pub price: Option<String>,
    pub year: Option<String>,
    pub mileage: Option<String>,
}

/// Split a combined details field on `|`. Blank or absent parts are `None`.
pub fn split_details(raw: &str) -> DetailParts {
    let mut parts = raw.split('|').map(|part| non_blank(part).map(str::to_string));

    DetailParts {
        price: parts.next().flatten(),
        year: parts.next().flatten(),
        mileage: parts.next().flatten(),
    }
}

/// Parse a year-only field by converting its first four characters.
///
/// No range check is applied: `"20XX"` is missing, `"1234abc"` is `1234`.
pub fn parse_year_prefix(raw: &str) -> Option<i32> {
    let prefix: String = raw.trim().chars().take(4).collect();
    match prefix.parse::<i32>() {
        Ok(year) => Some(year),
        Err(_) => {
            debug!("Unparseable year {:?}", raw);
            None
        }
    }
}

fn find_embedded_year(text: &str) -> Option<Range<usize>> {
    YEAR_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.range())
}

/// Year embedded in free text, taken from the first four-digit run.
///
/// A model code that precedes the actual year wins: `"2000 GT 2019"` is 2000.
pub fn extract_embedded_year(text: &str) -> Option<i32> {
    find_embedded_year(text).and_then(|range| text[range].parse().ok())
}

/// Remove the first four-digit run (the one `extract_embedded_year` reads)
pub fn strip_embedded_year(text: &str) -> String {
    match find_embedded_year(text) {
        Some(range) => format!("{}{}", &text[..range.start], &text[range.end..]),
        None => text.to_string(),
    }
}
