//! Error types for the soil scoring engine
//!
//! Two categories surface from this crate:
//! - `ValidationError`: caller-supplied samples (or the batch container) failed
//!   a structural or domain check. Always returned to the caller.
//! - `CatalogLoadError`: the catalog source could not be read or decoded.
//!   `Catalog::load_or_empty` recovers from it by logging and continuing with
//!   an empty catalog.
//!
//! Per-zone batch failures are not an error type; they are recorded inside
//! `BatchResult` as `ZoneOutcome::Failure`.

use crate::sample::Attribute;
use std::path::PathBuf;
use thiserror::Error;

/// A soil sample or batch container failed validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// One or more required attributes are absent.
    ///
    /// Zero is a legal value; only absence triggers this.
    #[error("Missing required soil parameters: {}", join_attributes(.0))]
    MissingAttributes(Vec<Attribute>),

    /// An attribute lies outside its allowed domain.
    #[error("{attribute} value must be between {min} and {max} (got {value})")]
    OutOfRange {
        attribute: Attribute,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A sample could not be decoded at all (wrong shape or wrong field types).
    #[error("Invalid soil data provided: {0}")]
    Malformed(String),

    /// Batch input was not a sequence of zones.
    #[error("Zones data must be an array")]
    NotASequence,
}

fn join_attributes(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .map(|a| a.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The external catalog source failed to load.
#[derive(Error, Debug)]
pub enum CatalogLoadError {
    #[error("Failed to read catalog file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read catalog CSV: {0}")]
    Csv(#[from] polars::prelude::PolarsError),

    #[error("Catalog CSV is missing column '{0}'")]
    MissingColumn(String),

    #[error("Unsupported catalog format: {0:?} (expected .json or .csv)")]
    UnsupportedFormat(PathBuf),
}

/// Result type for validated engine operations.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
