//! Runtime configuration
//!
//! Read from environment variables:
//! - `CATALOG_PATH`: species catalog (`.json` or `.csv`), default `data/trees_data.json`
//! - `MOCK_ZONES`: zones generated by the mock analyzer, default 9
//! - `MOCK_SEED`: optional RNG seed for reproducible mock zones
//!
//! Unparseable numeric values fall back to their defaults.

use crate::sampling::DEFAULT_ZONE_COUNT;
use std::path::PathBuf;

pub const DEFAULT_CATALOG_PATH: &str = "data/trees_data.json";

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub catalog_path: PathBuf,
    pub mock_zones: usize,
    pub mock_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            mock_zones: DEFAULT_ZONE_COUNT,
            mock_seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, map, ...)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            catalog_path: lookup("CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            mock_zones: lookup("MOCK_ZONES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.mock_zones),
            mock_seed: lookup("MOCK_SEED").and_then(|v| v.trim().parse().ok()),
        }
    }
}
