//! Summary Aggregator
//!
//! Mean / min / max per attribute over a batch of zones. Independent of the
//! catalog. Only zones with all three attributes present count as valid;
//! no domain check is applied here.

use crate::sample::{Attribute, SoilReading, SoilSample};
use crate::scorer::round2;
use serde::Serialize;
use serde_json::Value;

/// Per-attribute triple
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Conditions<T> {
    pub acidity: T,
    pub humidity: T,
    pub moisture: T,
}

impl<T> Conditions<T> {
    fn from_fn(mut f: impl FnMut(Attribute) -> T) -> Self {
        Self {
            acidity: f(Attribute::Acidity),
            humidity: f(Attribute::Humidity),
            moisture: f(Attribute::Moisture),
        }
    }
}

/// Observed extent of one attribute
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_zones: usize,
    pub valid_zones: usize,
    /// Rounded to 2 decimal places
    pub average_conditions: Conditions<f64>,
    pub ranges: Conditions<Extent>,
}

/// `None` when there are no zones or none of them is complete.
pub fn summarize(zones: &[SoilReading]) -> Option<Summary> {
    let valid: Vec<SoilSample> = zones.iter().filter_map(SoilReading::as_complete).collect();
    summarize_samples(zones.len(), &valid)
}

/// Summary over untyped input; `None` unless `zones` is a non-empty array.
///
/// Elements that do not decode as a reading count towards the total only.
pub fn summarize_json(zones: &Value) -> Option<Summary> {
    let zones = zones.as_array()?;
    let valid: Vec<SoilSample> = zones
        .iter()
        .filter_map(|raw| serde_json::from_value::<SoilReading>(raw.clone()).ok())
        .filter_map(|reading| reading.as_complete())
        .collect();
    summarize_samples(zones.len(), &valid)
}

fn summarize_samples(total_zones: usize, valid: &[SoilSample]) -> Option<Summary> {
    if total_zones == 0 || valid.is_empty() {
        return None;
    }

    let count = valid.len() as f64;
    let average_conditions = Conditions::from_fn(|attr| {
        round2(valid.iter().map(|s| s.get(attr)).sum::<f64>() / count)
    });
    let ranges = Conditions::from_fn(|attr| Extent {
        min: valid.iter().map(|s| s.get(attr)).fold(f64::INFINITY, f64::min),
        max: valid.iter().map(|s| s.get(attr)).fold(f64::NEG_INFINITY, f64::max),
    });

    Some(Summary {
        total_zones,
        valid_zones: valid.len(),
        average_conditions,
        ranges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_summary_over_valid_zones() {
        let zones = vec![
            SoilReading::new(Some(6.0), Some(45.0), Some(30.0)),
            SoilReading::new(Some(7.0), Some(60.0), Some(40.0)),
            SoilReading::new(Some(6.8), Some(55.0), Some(35.0)),
            SoilReading::new(Some(9.0), None, Some(35.0)),
        ];
        let summary = summarize(&zones).unwrap();
        assert_eq!(summary.total_zones, 4);
        assert_eq!(summary.valid_zones, 3);
        assert_relative_eq!(summary.average_conditions.acidity, 6.6);
        assert_relative_eq!(summary.average_conditions.humidity, 53.33);
        assert_relative_eq!(summary.average_conditions.moisture, 35.0);
        assert_eq!(summary.ranges.acidity, Extent { min: 6.0, max: 7.0 });
        assert_eq!(summary.ranges.humidity, Extent { min: 45.0, max: 60.0 });
    }

    #[test]
    fn test_out_of_domain_values_still_count() {
        let zones = vec![SoilReading::new(Some(20.0), Some(150.0), Some(-5.0))];
        let summary = summarize(&zones).unwrap();
        assert_eq!(summary.valid_zones, 1);
        assert_eq!(summary.ranges.acidity.max, 20.0);
    }

    #[test]
    fn test_null_cases() {
        assert!(summarize(&[]).is_none());
        assert!(summarize(&[SoilReading::new(Some(1.0), None, None)]).is_none());
        assert!(summarize_json(&serde_json::json!([])).is_none());
        assert!(summarize_json(&serde_json::json!({"acidity": 1})).is_none());
        assert!(summarize_json(&serde_json::json!([{"acidity": 1}])).is_none());
    }

    #[test]
    fn test_json_serialization() {
        let summary = summarize_json(&serde_json::json!([
            {"pH": 6.0, "humidity": 45, "moisture": 30},
            "garbage"
        ]))
        .unwrap();
        assert_eq!(summary.total_zones, 2);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["averageConditions"]["acidity"], 6.0);
        assert_eq!(value["ranges"]["moisture"]["max"], 30.0);
    }
}
