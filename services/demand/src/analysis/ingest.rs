//! Listing ingestion - reads delimited-text datasets into row records
//!
//! The two source datasets carry heterogeneous column sets and mix text with
//! raw numbers, so every column is read as text and interpretation is left
//! to the extractors. A missing dataset degrades to an empty collection; the
//! run continues on whatever loaded.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which source dataset a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSource {
    Houses,
    Cleaned,
}

impl DatasetSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetSource::Houses => "houses",
            DatasetSource::Cleaned => "cleaned",
        }
    }
}

/// Dataset loading failure.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read dataset {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

/// One raw listing row: an immutable column-name → text mapping.
///
/// Records have no identity beyond their source dataset and row index.
#[derive(Debug, Clone)]
pub struct ListingRecord {
    pub source: DatasetSource,
    pub row_index: usize,
    fields: HashMap<String, String>,
}

impl ListingRecord {
    pub fn new(source: DatasetSource, row_index: usize) -> Self {
        Self {
            source,
            row_index,
            fields: HashMap::new(),
        }
    }

    pub fn with_field(mut self, column: &str, value: &str) -> Self {
        self.fields.insert(column.to_string(), value.to_string());
        self
    }

    /// Column value, or empty text for absent columns.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Load a CSV dataset with an all-text schema.
pub fn load_dataset(path: &Path, source: DatasetSource) -> Result<Vec<ListingRecord>, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }

    let read_err = |e: PolarsError| DatasetError::Read {
        path: path.to_path_buf(),
        source: e,
    };

    // infer_schema_length of 0 keeps every column Utf8
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(0))
        .finish()
        .map_err(read_err)?
        .collect()
        .map_err(read_err)?;

    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut records = Vec::with_capacity(df.height());
    for row_index in 0..df.height() {
        let mut fields = HashMap::with_capacity(columns.len());
        for name in &columns {
            let value = df
                .column(name)
                .ok()
                .and_then(|col| col.str().ok())
                .and_then(|col| col.get(row_index))
                .unwrap_or("");
            fields.insert(name.clone(), value.to_string());
        }
        records.push(ListingRecord {
            source,
            row_index,
            fields,
        });
    }

    tracing::info!(
        "Loaded {} records from {} ({})",
        records.len(),
        path.display(),
        source.as_str()
    );

    Ok(records)
}

/// Load a dataset, degrading to empty on failure.
pub fn load_dataset_or_empty(path: &Path, source: DatasetSource) -> Vec<ListingRecord> {
    match load_dataset(path, source) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("Skipping {} dataset: {}", source.as_str(), e);
            Vec::new()
        }
    }
}

/// Enumerate candidate `.csv` datasets under a directory, sorted by path.
pub fn discover_datasets(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("csv"))
        .collect();
    paths.sort();
    paths
}

const MOCK_AREAS: [(&str, &str); 6] = [
    (
        "DLF Phase 2, Gurgaon",
        "metro station, cyber hub mall, fortis hospital",
    ),
    ("Sector 51, Gurgaon", "metro station, school, city park"),
    ("Sushant Lok, Gurgaon", "golf course road, metro, icici bank"),
    ("Sector 21A, Faridabad", "highway, school, community park"),
    ("Sector 15, Faridabad", "expressway, mall"),
    ("Rohini, Delhi", "metro station, school, bank"),
];

/// Generate synthetic listing records for tests and dry runs.
///
/// Areas cycle so every location accumulates enough listings to qualify as a
/// cluster. Fully deterministic for a given seed.
pub fn generate_mock_listings(count: usize, seed: u64) -> Vec<ListingRecord> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut records = Vec::with_capacity(count);

    for i in 0..count {
        let (address, nearby) = MOCK_AREAS[i % MOCK_AREAS.len()];
        let price_crore = 1.5 + rng.f64() * 8.0;
        let area_sqft = 800 + rng.usize(..1600);

        let price_text = match i % 3 {
            0 => format!("{:.1} Crore", price_crore),
            1 => format!("{:.0} Lakh", price_crore * 100.0),
            _ => format!("{:.0}", price_crore * 100.0),
        };

        let description = if rng.bool() {
            "Well maintained property with strong rental income potential"
        } else {
            "Spacious family home in an established neighbourhood"
        };

        records.push(
            ListingRecord::new(DatasetSource::Houses, i)
                .with_field("property_name", &format!("Mock Residency {}", i))
                .with_field("address", address)
                .with_field("price", &price_text)
                .with_field("area", &format!("{} sq ft", area_sqft))
                .with_field("bedRoom", &format!("{}", 2 + rng.usize(..3)))
                .with_field("bathroom", &format!("{}", 1 + rng.usize(..3)))
                .with_field("nearbyLocations", nearby)
                .with_field("description", description),
        );
    }

    records
}
