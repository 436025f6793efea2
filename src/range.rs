//! Range Parser
//!
//! Catalog ranges arrive either as a `[min, max]` pair or as text such as
//! `"6.0-7.5"`. Both are normalized into a `ParsedRange` once, when the
//! catalog is loaded, so scoring never re-parses.
//!
//! A range that cannot be parsed is not an error: it becomes an
//! unconstrained range (`min` and `max` both `None`), which is always
//! satisfied and contributes nothing to the score.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::sync::LazyLock;

/// First `<number>-<number>` occurrence in the text. Unanchored.
static RANGE_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)-(\d+\.?\d*)").expect("valid range regex"));

/// Range as it appears in the catalog source.
///
/// Echoed back unchanged in `SuggestionResult::requirements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRange {
    /// `[min, max]`; elements may be null. Numbers keep their source form.
    Pair(Vec<Option<Number>>),
    /// `"min-max"`
    Text(String),
    /// Anything else (null, objects, mixed arrays, ...)
    Other(serde_json::Value),
}

impl Default for RawRange {
    fn default() -> Self {
        RawRange::Other(serde_json::Value::Null)
    }
}

impl From<&str> for RawRange {
    fn from(text: &str) -> Self {
        RawRange::Text(text.to_string())
    }
}

impl From<[f64; 2]> for RawRange {
    fn from(pair: [f64; 2]) -> Self {
        RawRange::Pair(pair.into_iter().map(Number::from_f64).collect())
    }
}

/// Normalized `{min, max}` form of a range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ParsedRange {
    pub const UNCONSTRAINED: ParsedRange = ParsedRange { min: None, max: None };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    /// Both bounds, if both are defined
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }

    pub fn is_constrained(&self) -> bool {
        self.bounds().is_some()
    }
}

/// Parse a raw catalog range. Never fails.
///
/// Pairs are taken as-is (no ordering check); text is matched against
/// `<digits>[.<digits>]-<digits>[.<digits>]`.
pub fn parse_range(raw: &RawRange) -> ParsedRange {
    match raw {
        RawRange::Pair(values) => {
            let bound = |idx: usize| values.get(idx).and_then(|n| n.as_ref()?.as_f64());
            ParsedRange { min: bound(0), max: bound(1) }
        }
        RawRange::Text(text) => parse_range_text(text),
        RawRange::Other(_) => ParsedRange::UNCONSTRAINED,
    }
}

/// Parse `"min-max"` text; unconstrained when the pattern is absent.
pub fn parse_range_text(text: &str) -> ParsedRange {
    let Some(caps) = RANGE_TEXT_RE.captures(text) else {
        return ParsedRange::UNCONSTRAINED;
    };
    let number = |idx: usize| {
        caps.get(idx)
            .and_then(|m| m.as_str().trim_end_matches('.').parse::<f64>().ok())
    };
    match (number(1), number(2)) {
        (Some(min), Some(max)) => ParsedRange::new(min, max),
        _ => ParsedRange::UNCONSTRAINED,
    }
}
