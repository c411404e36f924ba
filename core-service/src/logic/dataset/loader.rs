//! CSV loader for the historical dataset

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::record::RawRow;
use super::{DatasetError, HistoricalDataset};

/// Columns the encoder and calibrator depend on (order free, extras ignored)
pub const REQUIRED_COLUMNS: &[&str] = &[
    "timestamp",
    "battery_temp",
    "ambient_temp",
    "device_state",
    "measured_health_impact",
];

impl HistoricalDataset {
    /// Load from a CSV file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        log::info!("Loading historical dataset from: {}", path.display());

        if !path.exists() {
            return Err(DatasetError::NotFound(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut dataset = Self::from_reader(BufReader::new(file))?;
        dataset.source = Some(path.to_path_buf());
        Ok(dataset)
    }

    /// Load from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !headers.iter().any(|h| h == **col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DatasetError::MissingColumns(missing));
        }

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for (i, result) in reader.deserialize::<RawRow>().enumerate() {
            // +2: header line and 1-based numbering
            let line = i + 2;
            match result.map_err(|e| e.to_string()).and_then(RawRow::into_record) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    skipped += 1;
                    log::warn!("Skipping dataset line {}: {}", line, reason);
                }
            }
        }

        log::info!("Dataset loaded: {} rows ({} skipped)", records.len(), skipped);
        Self::new(records, skipped, None)
    }
}
