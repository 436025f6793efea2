//! Query Engine
//!
//! Runs the scorer and compatibility predicate across the whole catalog for
//! one sample (`suggest`) or for a batch of zones (`suggest_for_zones`).
//!
//! Pipeline for a single sample:
//! 1. Validate (fail fast, nothing is scored on error)
//! 2. Score + compatibility for every entry
//! 3. Drop incompatible entries unless `include_incompatible`
//! 4. Drop entries below `minimum_score`
//! 5. Stable sort by `sort_key`
//! 6. Truncate to `max_results` when positive
//!
//! Batches are partial-failure tolerant: a zone that fails validation is
//! recorded as a `ZoneOutcome::Failure` and the remaining zones still run.

use crate::catalog::{Catalog, Requirements, SpeciesEntry};
use crate::compatibility::{is_compatible, violations};
use crate::error::{ValidationError, ValidationResult};
use crate::sample::{SoilReading, SoilSample};
use crate::scorer::{round2, score};
use crate::summary::{summarize, Summary};
use rayon::prelude::*;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt::Display;
use std::sync::Arc;

/// `max_results` applied to every zone of a batch
pub const BATCH_MAX_RESULTS: i64 = 5;

/// Ordering of returned suggestions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Highest score first
    #[default]
    Score,
    /// Alphabetical by name
    Name,
    /// Longest lifespan first (leading integer of the description)
    Lifespan,
}

impl SortKey {
    /// Parse a sort key name; unknown names fall back to `Score`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "name" => SortKey::Name,
            "lifespan" => SortKey::Lifespan,
            _ => SortKey::Score,
        }
    }
}

/// Caller-supplied query options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryOptions {
    #[serde(alias = "minScore")]
    pub minimum_score: f64,
    /// 0 or negative means unlimited
    pub max_results: i64,
    pub include_incompatible: bool,
    #[serde(alias = "sortBy")]
    pub sort_key: SortKey,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            minimum_score: 0.0,
            max_results: 10,
            include_incompatible: false,
            sort_key: SortKey::Score,
        }
    }
}

impl QueryOptions {
    pub fn with_max_results(mut self, max_results: i64) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_minimum_score(mut self, minimum_score: f64) -> Self {
        self.minimum_score = minimum_score;
        self
    }

    pub fn with_incompatible(mut self, include_incompatible: bool) -> Self {
        self.include_incompatible = include_incompatible;
        self
    }

    pub fn with_sort_key(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }
}

/// One catalog entry scored against one sample
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResult {
    pub id: String,
    pub name: String,
    pub role: String,
    pub lifespan_description: String,
    /// Rounded to 2 decimal places
    pub score: f64,
    pub compatible: bool,
    pub requirements: Requirements,
}

/// Output of a single-sample query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub soil_conditions: SoilSample,
    pub total_found: usize,
    pub suggestions: Vec<SuggestionResult>,
    pub timestamp: String,
}

/// A zone that produced suggestions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSuccess {
    /// 1-based position in the batch
    pub zone_id: usize,
    #[serde(flatten)]
    pub result: QueryResult,
}

/// A zone that failed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneFailure {
    /// 1-based position in the batch
    pub zone_id: usize,
    #[serde(serialize_with = "serialize_display")]
    pub error: ValidationError,
    /// The offending zone, as received
    pub soil_conditions: Value,
}

/// Per-zone outcome, tagged `"status": "success" | "failure"`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ZoneOutcome {
    Success(ZoneSuccess),
    Failure(ZoneFailure),
}

impl ZoneOutcome {
    pub fn zone_id(&self) -> usize {
        match self {
            ZoneOutcome::Success(s) => s.zone_id,
            ZoneOutcome::Failure(f) => f.zone_id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ZoneOutcome::Success(_))
    }
}

/// Output of a batch query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub total_zones: usize,
    pub processed_zones: usize,
    pub results: Vec<ZoneOutcome>,
    pub timestamp: String,
}

impl BatchResult {
    fn from_outcomes(results: Vec<ZoneOutcome>) -> Self {
        Self {
            total_zones: results.len(),
            processed_zones: results.iter().filter(|r| r.is_success()).count(),
            results,
            timestamp: timestamp(),
        }
    }
}

fn serialize_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Scores soil samples against a read-only catalog.
///
/// Cheap to clone; clones share the catalog.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    catalog: Arc<Catalog>,
}

impl SuggestionEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_shared_catalog(Arc::new(catalog))
    }

    pub fn with_shared_catalog(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Read-only catalog dump, each entry carrying its derived id
    pub fn list_catalog(&self) -> &[SpeciesEntry] {
        self.catalog.entries()
    }

    /// Ranked suggestions for one sample.
    pub fn suggest(&self, reading: &SoilReading, options: &QueryOptions) -> ValidationResult<QueryResult> {
        let sample = reading.validate()?;
        Ok(self.suggest_validated(&sample, options))
    }

    /// Ranked suggestions for an already-validated sample.
    pub fn suggest_validated(&self, sample: &SoilSample, options: &QueryOptions) -> QueryResult {
        let mut scored: Vec<(&SpeciesEntry, SuggestionResult)> = self
            .catalog
            .entries()
            .iter()
            .map(|entry| (entry, build_suggestion(sample, entry)))
            .filter(|(entry, s)| {
                if !(options.include_incompatible || s.compatible) {
                    tracing::trace!("{} excluded, outside {:?}", entry.id, violations(sample, entry));
                    return false;
                }
                true
            })
            .filter(|(_, s)| s.score >= options.minimum_score || options.minimum_score.is_nan())
            .collect();

        scored.sort_by(|(ea, a), (eb, b)| compare(options.sort_key, ea, a, eb, b));

        if options.max_results > 0 {
            scored.truncate(usize::try_from(options.max_results).unwrap_or(usize::MAX));
        }

        let suggestions: Vec<SuggestionResult> = scored.into_iter().map(|(_, s)| s).collect();
        tracing::debug!(
            "suggest: {} of {} species returned (sort={:?})",
            suggestions.len(),
            self.catalog.len(),
            options.sort_key
        );

        QueryResult {
            soil_conditions: *sample,
            total_found: suggestions.len(),
            suggestions,
            timestamp: timestamp(),
        }
    }

    /// Suggestions for every zone, sequentially, in input order.
    pub fn suggest_for_zones(&self, zones: &[SoilReading]) -> BatchResult {
        let results = zones
            .iter()
            .enumerate()
            .map(|(idx, zone)| self.zone_outcome(idx + 1, zone, || echo_reading(zone)))
            .collect();
        BatchResult::from_outcomes(results)
    }

    /// Same output as `suggest_for_zones`, zones scored on the rayon pool.
    pub fn suggest_for_zones_parallel(&self, zones: &[SoilReading]) -> BatchResult {
        let results = zones
            .par_iter()
            .enumerate()
            .map(|(idx, zone)| self.zone_outcome(idx + 1, zone, || echo_reading(zone)))
            .collect();
        BatchResult::from_outcomes(results)
    }

    /// Batch entry point for untyped input.
    ///
    /// Rejects anything that is not a JSON array. Elements that cannot be
    /// decoded as a reading become per-zone failures. Failed zones echo the
    /// element exactly as received.
    pub fn suggest_for_zones_json(&self, zones: &Value) -> ValidationResult<BatchResult> {
        let zones = zones.as_array().ok_or(ValidationError::NotASequence)?;
        let results = zones
            .iter()
            .enumerate()
            .map(|(idx, raw)| match serde_json::from_value::<SoilReading>(raw.clone()) {
                Ok(reading) => self.zone_outcome(idx + 1, &reading, || raw.clone()),
                Err(e) => ZoneOutcome::Failure(ZoneFailure {
                    zone_id: idx + 1,
                    error: ValidationError::Malformed(e.to_string()),
                    soil_conditions: raw.clone(),
                }),
            })
            .collect();
        Ok(BatchResult::from_outcomes(results))
    }

    /// Descriptive statistics over the zones. Does not touch the catalog.
    pub fn summarize(&self, zones: &[SoilReading]) -> Option<Summary> {
        summarize(zones)
    }

    fn zone_outcome(
        &self,
        zone_id: usize,
        zone: &SoilReading,
        echo: impl FnOnce() -> Value,
    ) -> ZoneOutcome {
        let options = QueryOptions::default().with_max_results(BATCH_MAX_RESULTS);
        match self.suggest(zone, &options) {
            Ok(result) => ZoneOutcome::Success(ZoneSuccess { zone_id, result }),
            Err(error) => {
                tracing::debug!("zone {} rejected: {}", zone_id, error);
                ZoneOutcome::Failure(ZoneFailure {
                    zone_id,
                    error,
                    soil_conditions: echo(),
                })
            }
        }
    }
}

fn echo_reading(zone: &SoilReading) -> Value {
    serde_json::to_value(zone).unwrap_or(Value::Null)
}

fn build_suggestion(sample: &SoilSample, entry: &SpeciesEntry) -> SuggestionResult {
    SuggestionResult {
        id: entry.id.clone(),
        name: entry.name.clone(),
        role: entry.role.clone(),
        lifespan_description: entry.lifespan_description.clone(),
        score: round2(score(sample, entry)),
        compatible: is_compatible(sample, entry),
        requirements: entry.requirements.clone(),
    }
}

fn compare(
    key: SortKey,
    entry_a: &SpeciesEntry,
    a: &SuggestionResult,
    entry_b: &SpeciesEntry,
    b: &SuggestionResult,
) -> Ordering {
    match key {
        SortKey::Score => b.score.total_cmp(&a.score),
        SortKey::Name => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
        SortKey::Lifespan => entry_b.lifespan_years().cmp(&entry_a.lifespan_years()),
    }
}
