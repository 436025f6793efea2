//! Species entries
//!
//! `SpeciesRecord` is the ingestion shape (one row/object of the catalog
//! source). `SpeciesEntry` is the loaded, immutable form: raw ranges kept for
//! display, parsed ranges and the lifespan sort key computed once.

use crate::range::{parse_range, ParsedRange, RawRange};
use crate::sample::Attribute;
use serde::{Deserialize, Serialize};

/// One catalog record as supplied by the data source.
///
/// Field aliases accept the older `pH`/`humidity`/`moisture`/`lifespan` keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesRecord {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, alias = "lifespan")]
    pub lifespan_description: String,
    #[serde(default, alias = "pH")]
    pub acidity_range: RawRange,
    #[serde(default, alias = "humidity")]
    pub humidity_range: RawRange,
    #[serde(default, alias = "moisture")]
    pub moisture_range: RawRange,
}

/// The three raw ranges, echoed back unparsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    pub acidity_range: RawRange,
    pub humidity_range: RawRange,
    pub moisture_range: RawRange,
}

/// A loaded catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesEntry {
    pub id: String,
    pub name: String,
    pub role: String,
    pub lifespan_description: String,
    #[serde(flatten)]
    pub requirements: Requirements,

    /// Indexed by `Attribute` order (acidity, humidity, moisture)
    #[serde(skip)]
    parsed: [ParsedRange; 3],

    #[serde(skip)]
    lifespan_years: i64,
}

impl SpeciesEntry {
    pub fn from_record(record: SpeciesRecord) -> Self {
        let parsed = [
            parse_range(&record.acidity_range),
            parse_range(&record.humidity_range),
            parse_range(&record.moisture_range),
        ];
        Self {
            id: derive_id(&record.name),
            lifespan_years: leading_integer(&record.lifespan_description),
            name: record.name,
            role: record.role,
            lifespan_description: record.lifespan_description,
            requirements: Requirements {
                acidity_range: record.acidity_range,
                humidity_range: record.humidity_range,
                moisture_range: record.moisture_range,
            },
            parsed,
        }
    }

    /// Parsed range for one attribute
    pub fn range(&self, attribute: Attribute) -> ParsedRange {
        match attribute {
            Attribute::Acidity => self.parsed[0],
            Attribute::Humidity => self.parsed[1],
            Attribute::Moisture => self.parsed[2],
        }
    }

    /// Leading integer of `lifespan_description`, 0 when absent
    pub fn lifespan_years(&self) -> i64 {
        self.lifespan_years
    }
}

/// Derive a stable id from a display name.
///
/// Lowercases, then collapses every run of characters outside `[a-z0-9]`
/// into a single `_`. "Neem Tree" → "neem_tree".
pub fn derive_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            id.push(c);
            in_separator = false;
        } else if !in_separator {
            id.push('_');
            in_separator = true;
        }
    }
    id
}

/// Best-effort leading integer: optional whitespace, optional sign, digits.
///
/// "30-50 years" → 30, "about 40" → 0.
pub fn leading_integer(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    rest[..digits_len]
        .parse::<i64>()
        .map(|n| sign * n)
        .unwrap_or(0)
}
