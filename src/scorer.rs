//! Scorer
//!
//! Continuous fit between a soil sample and a species entry.
//!
//! Per attribute with a defined range:
//!   mid   = (min + max) / 2
//!   width = max - min
//!   sub   = clamp(1 - |value - mid| / width, 0, 1)
//!
//! The sub-score decays linearly from 1.0 at the midpoint and reaches 0.0 at
//! one half-range past either bound. The aggregate is the mean over defined
//! attributes, scaled to [0, 100]. An entry without any defined range scores 0.

use crate::catalog::SpeciesEntry;
use crate::range::ParsedRange;
use crate::sample::{Attribute, SoilSample};
use smallvec::SmallVec;

/// Sub-score in [0, 1] for one attribute, `None` when the range is undefined.
///
/// Zero-width ranges score 1.0 on an exact hit and 0.0 otherwise. Inverted
/// ranges (min > max) can never be satisfied and score 0; non-finite results
/// score 0.
pub fn attribute_score(value: f64, range: ParsedRange) -> Option<f64> {
    let (min, max) = range.bounds()?;
    let mid = (min + max) / 2.0;
    let width = max - min;

    if width == 0.0 {
        return Some(if value == mid { 1.0 } else { 0.0 });
    }
    if width < 0.0 {
        return Some(0.0);
    }

    let sub = 1.0 - (value - mid).abs() / width;
    if sub.is_finite() {
        Some(sub.clamp(0.0, 1.0))
    } else {
        Some(0.0)
    }
}

/// Per-attribute sub-scores, in `Attribute::ALL` order
pub fn sub_scores(sample: &SoilSample, entry: &SpeciesEntry) -> SmallVec<[(Attribute, f64); 3]> {
    Attribute::ALL
        .into_iter()
        .filter_map(|attr| attribute_score(sample.get(attr), entry.range(attr)).map(|s| (attr, s)))
        .collect()
}

/// Aggregate compatibility score in [0, 100], full precision.
pub fn score(sample: &SoilSample, entry: &SpeciesEntry) -> f64 {
    let subs = sub_scores(sample, entry);
    if subs.is_empty() {
        return 0.0;
    }
    let total: f64 = subs.iter().map(|(_, s)| s).sum();
    (total / subs.len() as f64) * 100.0
}

/// Round to 2 decimal places (half away from zero)
pub fn round2(value: f64) -> f64 {
    libm::round(value * 100.0) / 100.0
}
