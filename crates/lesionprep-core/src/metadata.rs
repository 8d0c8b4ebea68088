//! Metadata table loading and validation.
//!
//! The metadata CSV maps image identifiers to class labels. The table is
//! loaded in full as an immutable snapshot before any files are touched, so
//! schema problems and duplicate identifiers fail the run up front.

use crate::config::DatasetConfig;
use crate::error::{PrepError, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Names of the identifier and label columns in the metadata CSV.
///
/// Column names are configuration rather than constants; the defaults match
/// the HAM10000 schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataColumns {
    pub image_id: String,
    pub label: String,
}

impl Default for MetadataColumns {
    fn default() -> Self {
        Self {
            image_id: DatasetConfig::ID_COLUMN.to_string(),
            label: DatasetConfig::LABEL_COLUMN.to_string(),
        }
    }
}

/// One row of the metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub image_id: String,
    pub label: String,
}

/// The full metadata table, in file order.
#[derive(Debug, Clone)]
pub struct MetadataTable {
    records: Vec<MetadataRecord>,
}

impl MetadataTable {
    /// Load and validate a metadata CSV.
    ///
    /// Fails if the file does not exist, if either configured column is
    /// absent from the header row, or if an identifier occurs more than once.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the metadata CSV file
    /// * `columns` - Names of the identifier and label columns
    pub fn load(path: &Path, columns: &MetadataColumns) -> Result<Self> {
        if !path.exists() {
            return Err(PrepError::MetadataNotFound(path.to_path_buf()));
        }

        info!("Reading metadata CSV from {}", path.display());

        let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
        let headers = reader.headers()?.clone();

        let id_idx = headers
            .iter()
            .position(|h| h == columns.image_id)
            .ok_or_else(|| PrepError::MissingColumn {
                column: columns.image_id.clone(),
                path: path.to_path_buf(),
            })?;
        let label_idx = headers
            .iter()
            .position(|h| h == columns.label)
            .ok_or_else(|| PrepError::MissingColumn {
                column: columns.label.clone(),
                path: path.to_path_buf(),
            })?;

        let mut records = Vec::new();
        let mut seen = HashSet::new();

        for result in reader.records() {
            let record = result?;
            let image_id = record.get(id_idx).unwrap_or("").to_string();
            let label = record.get(label_idx).unwrap_or("").to_string();

            if !seen.insert(image_id.clone()) {
                return Err(PrepError::DuplicateIdentifier {
                    identifier: image_id,
                });
            }

            records.push(MetadataRecord { image_id, label });
        }

        info!("Loaded {} metadata records", records.len());
        Ok(Self { records })
    }

    /// All records, in file order.
    pub fn records(&self) -> &[MetadataRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
