//! Soil samples
//!
//! A `SoilReading` is what a caller hands in: every attribute may be absent.
//! `SoilReading::validate` turns it into a `SoilSample`, where all three
//! attributes are present and inside their domains.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Acidity (pH) domain, inclusive.
pub const ACIDITY_DOMAIN: (f64, f64) = (0.0, 14.0);
/// Humidity domain (%), inclusive.
pub const HUMIDITY_DOMAIN: (f64, f64) = (0.0, 100.0);
/// Moisture domain (%), inclusive.
pub const MOISTURE_DOMAIN: (f64, f64) = (0.0, 100.0);

/// The three soil attributes the engine scores on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Acidity,
    Humidity,
    Moisture,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Attribute::Acidity, Attribute::Humidity, Attribute::Moisture];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Acidity => "acidity",
            Attribute::Humidity => "humidity",
            Attribute::Moisture => "moisture",
        }
    }

    /// Allowed (min, max) for validation
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Attribute::Acidity => ACIDITY_DOMAIN,
            Attribute::Humidity => HUMIDITY_DOMAIN,
            Attribute::Moisture => MOISTURE_DOMAIN,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated soil sample. All attributes present and within domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    pub acidity: f64,
    pub humidity: f64,
    pub moisture: f64,
}

impl SoilSample {
    pub fn new(acidity: f64, humidity: f64, moisture: f64) -> Self {
        Self { acidity, humidity, moisture }
    }

    pub fn get(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Acidity => self.acidity,
            Attribute::Humidity => self.humidity,
            Attribute::Moisture => self.moisture,
        }
    }
}

/// Caller-supplied soil measurements, possibly incomplete.
///
/// `pH` is accepted as an alias for `acidity` (the field name used by the
/// zone analysis payloads).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SoilReading {
    #[serde(default, alias = "pH", skip_serializing_if = "Option::is_none")]
    pub acidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisture: Option<f64>,
}

impl SoilReading {
    pub fn new(acidity: Option<f64>, humidity: Option<f64>, moisture: Option<f64>) -> Self {
        Self { acidity, humidity, moisture }
    }

    pub fn get(&self, attribute: Attribute) -> Option<f64> {
        match attribute {
            Attribute::Acidity => self.acidity,
            Attribute::Humidity => self.humidity,
            Attribute::Moisture => self.moisture,
        }
    }

    /// All three attributes present (no domain check)
    pub fn as_complete(&self) -> Option<SoilSample> {
        Some(SoilSample {
            acidity: self.acidity?,
            humidity: self.humidity?,
            moisture: self.moisture?,
        })
    }

    /// Presence check first, then domain checks in attribute order.
    ///
    /// Non-finite values fail the domain check.
    pub fn validate(&self) -> ValidationResult<SoilSample> {
        let missing: Vec<Attribute> = Attribute::ALL
            .into_iter()
            .filter(|a| self.get(*a).is_none())
            .collect();
        let sample = match self.as_complete() {
            Some(sample) if missing.is_empty() => sample,
            _ => return Err(ValidationError::MissingAttributes(missing)),
        };

        for attribute in Attribute::ALL {
            let value = sample.get(attribute);
            let (min, max) = attribute.domain();
            if !(min..=max).contains(&value) {
                return Err(ValidationError::OutOfRange { attribute, value, min, max });
            }
        }

        Ok(sample)
    }
}

impl From<SoilSample> for SoilReading {
    fn from(sample: SoilSample) -> Self {
        Self {
            acidity: Some(sample.acidity),
            humidity: Some(sample.humidity),
            moisture: Some(sample.moisture),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_a_legal_value() {
        let reading = SoilReading::new(Some(0.0), Some(0.0), Some(0.0));
        assert_eq!(reading.validate(), Ok(SoilSample::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_missing_attributes_reported_together() {
        let reading = SoilReading::new(Some(6.5), None, None);
        assert_eq!(
            reading.validate(),
            Err(ValidationError::MissingAttributes(vec![
                Attribute::Humidity,
                Attribute::Moisture
            ]))
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(SoilReading::new(Some(14.0), Some(100.0), Some(100.0)).validate().is_ok());
        assert!(matches!(
            SoilReading::new(Some(6.0), Some(100.5), Some(10.0)).validate(),
            Err(ValidationError::OutOfRange { attribute: Attribute::Humidity, .. })
        ));
        assert!(matches!(
            SoilReading::new(Some(6.0), Some(50.0), Some(-1.0)).validate(),
            Err(ValidationError::OutOfRange { attribute: Attribute::Moisture, .. })
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let reading = SoilReading::new(Some(f64::NAN), Some(50.0), Some(50.0));
        assert!(matches!(
            reading.validate(),
            Err(ValidationError::OutOfRange { attribute: Attribute::Acidity, .. })
        ));
    }

    #[test]
    fn test_ph_alias() {
        let reading: SoilReading =
            serde_json::from_str(r#"{"pH": 6.5, "humidity": 50, "moisture": 40}"#).unwrap();
        assert_eq!(reading.acidity, Some(6.5));
    }
}
