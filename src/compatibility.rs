//! Compatibility Predicate
//!
//! Hard-constraint check: the sample lies inside every defined range
//! (inclusive). Undefined ranges are vacuously satisfied. Independent of the
//! continuous score.

use crate::catalog::SpeciesEntry;
use crate::range::ParsedRange;
use crate::sample::{Attribute, SoilSample};

/// Inclusive containment; unconstrained ranges always match.
pub fn within_range(value: f64, range: ParsedRange) -> bool {
    match range.bounds() {
        Some((min, max)) => min <= value && value <= max,
        None => true,
    }
}

/// True when every attribute is within its range.
pub fn is_compatible(sample: &SoilSample, entry: &SpeciesEntry) -> bool {
    Attribute::ALL
        .into_iter()
        .all(|attr| within_range(sample.get(attr), entry.range(attr)))
}

/// Attributes that fall outside their range
pub fn violations(sample: &SoilSample, entry: &SpeciesEntry) -> Vec<Attribute> {
    Attribute::ALL
        .into_iter()
        .filter(|attr| !within_range(sample.get(*attr), entry.range(*attr)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SpeciesRecord;
    use crate::range::RawRange;

    fn neem() -> SpeciesEntry {
        SpeciesEntry::from_record(SpeciesRecord {
            name: "Neem Tree".to_string(),
            role: "Shade".to_string(),
            lifespan_description: "40-50 years".to_string(),
            acidity_range: RawRange::from("6.0-8.0"),
            humidity_range: RawRange::from([40.0, 70.0]),
            moisture_range: RawRange::from([30.0, 60.0]),
        })
    }

    #[test]
    fn test_bounds_inclusive() {
        let range = ParsedRange::new(6.0, 8.0);
        assert!(within_range(6.0, range));
        assert!(within_range(8.0, range));
        assert!(!within_range(8.01, range));
        assert!(!within_range(5.99, range));
    }

    #[test]
    fn test_unconstrained_always_matches() {
        assert!(within_range(f64::MAX, ParsedRange::UNCONSTRAINED));
    }

    #[test]
    fn test_inverted_range_never_matches() {
        assert!(!within_range(7.0, ParsedRange::new(8.0, 6.0)));
    }

    #[test]
    fn test_compatible_and_violations() {
        let entry = neem();
        assert!(is_compatible(&SoilSample::new(7.0, 55.0, 45.0), &entry));

        let sample = SoilSample::new(1.0, 55.0, 61.0);
        assert!(!is_compatible(&sample, &entry));
        assert_eq!(violations(&sample, &entry), vec![Attribute::Acidity, Attribute::Moisture]);
    }

    #[test]
    fn test_low_score_can_still_be_compatible() {
        // Edge of a wide range: compatible, score 50 on that attribute
        let entry = neem();
        let sample = SoilSample::new(8.0, 40.0, 30.0);
        assert!(is_compatible(&sample, &entry));
        assert!(crate::scorer::score(&sample, &entry) < 51.0);
    }
}
