//! Catalog ingestion
//!
//! Reads species records from JSON (array of objects) or CSV (one row per
//! species, ranges as `"min-max"` text). Individual records that cannot be
//! decoded are skipped with a warning; a source that cannot be read at all
//! is a `CatalogLoadError`.

use super::entry::SpeciesRecord;
use crate::error::CatalogLoadError;
use crate::range::RawRange;
use polars::prelude::*;
use std::fs;
use std::path::Path;

/// Load records, choosing the reader from the file extension.
pub fn read_records(path: &Path) -> Result<Vec<SpeciesRecord>, CatalogLoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("json") => read_json_records(path),
        Some("csv") => read_csv_records(path),
        _ => Err(CatalogLoadError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Load records from a JSON file containing an array of species objects.
pub fn read_json_records(path: &Path) -> Result<Vec<SpeciesRecord>, CatalogLoadError> {
    let contents = fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    records_from_json_str(&contents)
}

/// Decode a JSON array of species objects.
///
/// The top level must be an array. Elements that fail to decode (e.g. no
/// `name`) are skipped.
pub fn records_from_json_str(json: &str) -> Result<Vec<SpeciesRecord>, CatalogLoadError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let mut records = Vec::with_capacity(values.len());

    for (idx, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<SpeciesRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("Skipping catalog record {}: {}", idx, e),
        }
    }

    Ok(records)
}

/// Load records from CSV.
///
/// Every column is read as text so range columns keep their `"min-max"`
/// encoding. Required columns: `name` and the three range columns. `role` and
/// `lifespanDescription` (or `lifespan`) are optional.
pub fn read_csv_records(path: &Path) -> Result<Vec<SpeciesRecord>, CatalogLoadError> {
    if !path.exists() {
        return Err(CatalogLoadError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "catalog file not found"),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.into()))?
        .finish()?;

    let names = string_column(&df, &["name"])?;
    let acidity = string_column(&df, &["acidityRange", "pH"])?;
    let humidity = string_column(&df, &["humidityRange", "humidity"])?;
    let moisture = string_column(&df, &["moistureRange", "moisture"])?;
    let roles = string_column(&df, &["role"]).ok();
    let lifespans = string_column(&df, &["lifespanDescription", "lifespan"]).ok();

    let text_range = |col: &StringChunked, idx: usize| {
        col.get(idx)
            .filter(|s| !s.trim().is_empty())
            .map(RawRange::from)
            .unwrap_or_default()
    };

    let mut records = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let Some(name) = names.get(idx).filter(|s| !s.trim().is_empty()) else {
            tracing::warn!("Skipping catalog row {}: missing name", idx);
            continue;
        };
        records.push(SpeciesRecord {
            name: name.to_string(),
            role: roles.and_then(|c| c.get(idx)).unwrap_or_default().to_string(),
            lifespan_description: lifespans
                .and_then(|c| c.get(idx))
                .unwrap_or_default()
                .to_string(),
            acidity_range: text_range(acidity, idx),
            humidity_range: text_range(humidity, idx),
            moisture_range: text_range(moisture, idx),
        });
    }

    Ok(records)
}

/// First column present among `candidates`, as strings
fn string_column<'a>(
    df: &'a DataFrame,
    candidates: &[&str],
) -> Result<&'a StringChunked, CatalogLoadError> {
    for name in candidates {
        if let Ok(column) = df.column(name) {
            return Ok(column.str()?);
        }
    }
    Err(CatalogLoadError::MissingColumn(
        candidates.first().copied().unwrap_or_default().to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_json_skips_bad_records() {
        let json = r#"[
            {"name": "Neem Tree", "role": "Shade", "lifespanDescription": "40-50 years",
             "acidityRange": "6.0-8.0", "humidityRange": [40, 70], "moistureRange": [30, 60]},
            {"role": "Nameless"},
            {"name": "Banyan", "acidityRange": "6.5-7.5"}
        ]"#;
        let records = records_from_json_str(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Neem Tree");
        assert_eq!(records[1].humidity_range, RawRange::default());
    }

    #[test]
    fn test_json_top_level_must_be_array() {
        assert!(matches!(
            records_from_json_str(r#"{"name": "Neem"}"#),
            Err(CatalogLoadError::Json(_))
        ));
    }

    #[test]
    fn test_csv_records() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "name,role,lifespanDescription,acidityRange,humidityRange,moistureRange").unwrap();
        writeln!(file, "Neem Tree,Shade,40-50 years,6.0-8.0,40-70,30-60").unwrap();
        writeln!(file, "Teak,Timber,,5.5-7.0,,20-50").unwrap();
        file.flush().unwrap();

        let records = read_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].acidity_range, RawRange::from("6.0-8.0"));
        assert_eq!(records[0].lifespan_description, "40-50 years");
        assert_eq!(records[1].lifespan_description, "");
        assert_eq!(records[1].humidity_range, RawRange::default());
    }

    #[test]
    fn test_csv_missing_range_column() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "name,role,acidityRange,humidityRange").unwrap();
        writeln!(file, "Neem Tree,Shade,6.0-8.0,40-70").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            read_records(file.path()),
            Err(CatalogLoadError::MissingColumn(col)) if col == "moistureRange"
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            read_records(Path::new("catalog.parquet")),
            Err(CatalogLoadError::UnsupportedFormat(_))
        ));
    }
}
