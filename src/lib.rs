//! Soil Scorer Rust Implementation
//!
//! Matches observed soil conditions (acidity, humidity, moisture) against a
//! catalog of species tolerance ranges and returns ranked, filterable
//! recommendations.
//!
//! Module layout:
//! - `catalog/`: Catalog store, species entries, JSON/CSV ingestion
//! - `range`: Range parser (`[min, max]` pairs and `"min-max"` text)
//! - `scorer`: Midpoint-distance compatibility score in [0, 100]
//! - `compatibility`: Inclusive range predicate
//! - `query`: Single-sample and batch query engine
//! - `summary`: Mean/min/max over a batch of zones
//! - `sampling`: Mock zone generator standing in for image analysis
//! - `config`: Environment-based configuration

pub mod catalog;
pub mod compatibility;
pub mod config;
pub mod error;
pub mod query;
pub mod range;
pub mod sample;
pub mod sampling;
pub mod scorer;
pub mod summary;

// Re-export commonly used types
pub use catalog::{derive_id, Catalog, CatalogHealth, SpeciesEntry, SpeciesRecord};
pub use compatibility::is_compatible;
pub use config::EngineConfig;
pub use error::{CatalogLoadError, ValidationError};
pub use query::{
    BatchResult, QueryOptions, QueryResult, SortKey, SuggestionEngine, SuggestionResult,
    ZoneFailure, ZoneOutcome, ZoneSuccess, BATCH_MAX_RESULTS,
};
pub use range::{parse_range, ParsedRange, RawRange};
pub use sample::{Attribute, SoilReading, SoilSample};
pub use scorer::score;
pub use summary::{summarize, summarize_json, Summary};
