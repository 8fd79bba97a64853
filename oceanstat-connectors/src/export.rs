//! CSV export of the collection server
//!
//! The collector writes every stored reading to a CSV file:
//!
//! ```text
//! WavyId,AggregatorId,DataType,Timestamp,RawValue,ReceivedAt
//! WAVY_01,AGG_01,temperature,2025-05-01T10:00:00,21.4,2025-05-01T10:00:01
//! ```
//!
//! [`CsvExportSource`] reads that file and groups numeric readings by data
//! type. The first line is always the header. Rows with fewer than five
//! fields and rows whose raw value is not a number are skipped and counted
//! in [`ExportStats`].

use std::io;
use std::path::{Path, PathBuf};

use oceanstat_core::{DataSource, DataType, ReadingsByType, SensorRecord};
use thiserror::Error;

/// Column header of the export
pub const EXPORT_HEADER: &str = "WavyId,AggregatorId,DataType,Timestamp,RawValue,ReceivedAt";

/// Fields a row needs to carry a reading
pub const MIN_FIELDS: usize = 5;

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// File could not be read
    #[error("Failed to read export {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Counters for one pass over an export
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportStats {
    /// Data lines seen, header excluded
    pub lines_processed: usize,
    /// Rows turned into readings
    pub records_read: usize,
    /// Rows with fewer than five fields
    pub short_rows: usize,
    /// Rows whose raw value is not a number
    pub non_numeric: usize,
    /// Rows dropped by the data-type filter
    pub filtered: usize,
    /// Bytes read from the file
    pub bytes_read: usize,
}

#[derive(Debug)]
enum RowSkip {
    Short,
    NonNumeric,
}

fn parse_row(line: &str) -> Result<SensorRecord, RowSkip> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    if fields.len() < MIN_FIELDS {
        return Err(RowSkip::Short);
    }

    let record = SensorRecord {
        sensor_id: fields[0].to_string(),
        aggregator_id: fields[1].to_string(),
        data_type: fields[2].to_string(),
        timestamp: fields[3].to_string(),
        raw_value: fields[4].to_string(),
        received_at: fields.get(5).map(|s| s.to_string()).unwrap_or_default(),
    };
    match record.numeric_value() {
        Some(_) => Ok(record),
        None => Err(RowSkip::NonNumeric),
    }
}

/// [`DataSource`] over an export file
///
/// The file is re-read on every call to [`DataSource::readings`], so a
/// long-running caller sees the collector's latest export.
#[derive(Debug, Clone)]
pub struct CsvExportSource {
    path: PathBuf,
    known_types: Option<Vec<String>>,
    stats: ExportStats,
}

impl CsvExportSource {
    /// Source reading `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            known_types: None,
            stats: ExportStats::default(),
        }
    }

    /// Keep only the listed data types
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Keep only temperature, humidity, water level and wind speed
    pub fn with_known_types(self) -> Self {
        self.with_types(DataType::known().iter().map(DataType::label))
    }

    /// Path being read
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Counters from the last read
    pub fn stats(&self) -> &ExportStats {
        &self.stats
    }

    /// Group the rows of `text`, updating counters
    pub fn group(&mut self, text: &str) -> ReadingsByType {
        let mut stats = ExportStats {
            bytes_read: text.len(),
            ..ExportStats::default()
        };
        let mut records = Vec::new();

        for line in text.lines().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            stats.lines_processed += 1;

            match parse_row(line) {
                Ok(record) if self.accepts(&record.data_type) => records.push(record),
                Ok(_) => stats.filtered += 1,
                Err(RowSkip::Short) => stats.short_rows += 1,
                Err(RowSkip::NonNumeric) => stats.non_numeric += 1,
            }
        }

        stats.records_read = records.len();
        self.stats = stats;
        ReadingsByType::from_records(&records)
    }

    fn accepts(&self, data_type: &str) -> bool {
        match &self.known_types {
            Some(types) => types.iter().any(|known| known == data_type),
            None => true,
        }
    }
}

impl DataSource for CsvExportSource {
    type Error = ExportError;

    fn readings(&mut self) -> Result<ReadingsByType, ExportError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| ExportError::Read {
            path: self.path.display().to_string(),
            source,
        })?;

        let grouped = self.group(&text);
        for (data_type, values) in grouped.iter() {
            log::info!("Loaded {} {} readings", values.len(), data_type);
        }
        if self.stats.short_rows + self.stats.non_numeric > 0 {
            log::warn!(
                "Skipped {} short rows and {} non-numeric rows in {}",
                self.stats.short_rows,
                self.stats.non_numeric,
                self.path.display()
            );
        }
        Ok(grouped)
    }
}
