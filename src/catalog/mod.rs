//! Catalog Store
//!
//! Holds the species list loaded once at startup. Read-only afterwards, so a
//! single `Catalog` can be shared between threads (e.g. behind an `Arc`)
//! without locking.
//!
//! ## Architecture
//! - `entry.rs` - SpeciesRecord (ingestion) / SpeciesEntry (loaded) + id derivation
//! - `loader.rs` - JSON and CSV readers

pub mod entry;
pub mod loader;

pub use entry::{derive_id, leading_integer, Requirements, SpeciesEntry, SpeciesRecord};

use crate::error::CatalogLoadError;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::path::Path;

/// Immutable catalog of species entries.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<SpeciesEntry>,
    /// id → position of the first entry carrying it
    index: FxHashMap<String, usize>,
    /// ids derived by more than one entry
    collisions: Vec<String>,
}

/// Service-level view of the catalog
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogHealth {
    pub total_species: usize,
    pub timestamp: String,
}

impl Catalog {
    /// An empty catalog. Queries over it succeed with zero results.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from already-decoded records. Ranges are parsed here.
    pub fn from_records(records: impl IntoIterator<Item = SpeciesRecord>) -> Self {
        let entries: Vec<SpeciesEntry> = records.into_iter().map(SpeciesEntry::from_record).collect();

        let mut index = FxHashMap::default();
        let mut collisions = Vec::new();
        for (pos, entry) in entries.iter().enumerate() {
            if index.contains_key(&entry.id) {
                tracing::warn!("Catalog id collision: '{}' ({})", entry.id, entry.name);
                if !collisions.contains(&entry.id) {
                    collisions.push(entry.id.clone());
                }
            } else {
                index.insert(entry.id.clone(), pos);
            }
        }

        Self { entries, index, collisions }
    }

    /// Load from a `.json` or `.csv` file.
    pub fn load(path: &Path) -> Result<Self, CatalogLoadError> {
        let records = loader::read_records(path)?;
        let catalog = Self::from_records(records);
        tracing::info!("Loaded catalog from {:?}: {} species", path, catalog.len());
        Ok(catalog)
    }

    /// Load, falling back to an empty catalog when the source is unusable.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("Catalog load failed, continuing with empty catalog: {}", e);
                Self::empty()
            }
        }
    }

    pub fn entries(&self) -> &[SpeciesEntry] {
        &self.entries
    }

    /// Lookup by derived id. With colliding ids the first entry wins.
    pub fn get(&self, id: &str) -> Option<&SpeciesEntry> {
        self.index.get(id).map(|&pos| &self.entries[pos])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids shared by two or more entries
    pub fn id_collisions(&self) -> &[String] {
        &self.collisions
    }

    pub fn health(&self) -> CatalogHealth {
        CatalogHealth {
            total_species: self.len(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::RawRange;
    use std::io::Write;

    fn record(name: &str) -> SpeciesRecord {
        SpeciesRecord {
            name: name.to_string(),
            role: String::new(),
            lifespan_description: String::new(),
            acidity_range: RawRange::from("6.0-7.0"),
            humidity_range: RawRange::default(),
            moisture_range: RawRange::default(),
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::from_records(vec![record("Neem Tree"), record("Banyan")]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("banyan").map(|e| e.name.as_str()), Some("Banyan"));
        assert!(catalog.get("oak").is_none());
        assert!(catalog.id_collisions().is_empty());
    }

    #[test]
    fn test_id_collision_flagged() {
        let catalog = Catalog::from_records(vec![
            record("Neem Tree"),
            record("Neem-Tree"),
            record("neem tree"),
        ]);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.id_collisions(), ["neem_tree".to_string()]);
        assert_eq!(catalog.get("neem_tree").map(|e| e.name.as_str()), Some("Neem Tree"));
    }

    #[test]
    fn test_missing_file_yields_empty_catalog() {
        let catalog = Catalog::load_or_empty(Path::new("/nonexistent/trees_data.json"));
        assert!(catalog.is_empty());
        assert_eq!(catalog.health().total_species, 0);
    }

    #[test]
    fn test_corrupt_file_yields_empty_catalog() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{ not json").unwrap();
        file.flush().unwrap();

        assert!(Catalog::load(file.path()).is_err());
        assert!(Catalog::load_or_empty(file.path()).is_empty());
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"name": "Neem Tree", "role": "Shade", "lifespanDescription": "40-50 years",
                 "acidityRange": "6.0-8.0", "humidityRange": [40, 70], "moistureRange": [30, 60]}}]"#
        )
        .unwrap();
        file.flush().unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].id, "neem_tree");
    }
}
