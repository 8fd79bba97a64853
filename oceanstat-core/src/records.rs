//! Upstream record shape and per-type grouping
//!
//! Collection servers export one row per reading:
//!
//! ```text
//! sensor_id, aggregator_id, data_type, timestamp, raw_value, received_at
//! ```
//!
//! The engine only wants flat value sequences per data type, so records are
//! grouped here before any request is built. Rows whose raw value does not
//! parse as a number are skipped; values that parse to NaN or infinity are
//! kept and left for the cleaner to count.

use alloc::string::String;
use alloc::vec::Vec;

use crate::request::AnalysisRequest;

/// One exported reading
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorRecord {
    /// Sensor (buoy) identifier
    pub sensor_id: String,
    /// Aggregator that relayed the reading
    pub aggregator_id: String,
    /// Data-type label
    pub data_type: String,
    /// Timestamp reported by the sensor
    pub timestamp: String,
    /// Reading as text, exactly as exported
    pub raw_value: String,
    /// Time the collection server received the reading
    pub received_at: String,
}

impl SensorRecord {
    /// Reading as a number, if the raw text parses as one
    pub fn numeric_value(&self) -> Option<f64> {
        self.raw_value.trim().parse().ok()
    }
}

/// Readings grouped by data-type label, in first-seen order of labels
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadingsByType {
    groups: Vec<(String, Vec<f64>)>,
}

impl ReadingsByType {
    /// Empty grouping
    pub fn new() -> Self {
        Self::default()
    }

    /// Group numeric records by data type, skipping non-numeric raw values
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SensorRecord>,
    {
        let mut grouped = Self::new();
        for record in records {
            if let Some(value) = record.numeric_value() {
                grouped.push(&record.data_type, value);
            }
        }
        grouped
    }

    /// Append a reading under a label
    pub fn push(&mut self, data_type: &str, value: f64) {
        match self.groups.iter_mut().find(|(label, _)| label == data_type) {
            Some((_, values)) => values.push(value),
            None => self.groups.push((String::from(data_type), alloc::vec![value])),
        }
    }

    /// Readings for a label
    pub fn get(&self, data_type: &str) -> Option<&[f64]> {
        self.groups
            .iter()
            .find(|(label, _)| label == data_type)
            .map(|(_, values)| values.as_slice())
    }

    /// Labels with their readings
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.groups
            .iter()
            .map(|(label, values)| (label.as_str(), values.as_slice()))
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no readings were grouped
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total readings across all labels
    pub fn total_readings(&self) -> usize {
        self.groups.iter().map(|(_, values)| values.len()).sum()
    }

    /// One analysis request per label
    pub fn into_requests(self) -> Vec<AnalysisRequest> {
        self.groups
            .into_iter()
            .map(|(label, values)| AnalysisRequest::new(label, values))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(data_type: &str, raw_value: &str) -> SensorRecord {
        SensorRecord {
            sensor_id: "WAVY_01".into(),
            aggregator_id: "AGG_01".into(),
            data_type: data_type.into(),
            timestamp: "2025-05-01T10:00:00".into(),
            raw_value: raw_value.into(),
            received_at: "2025-05-01T10:00:01".into(),
        }
    }

    #[test]
    fn numeric_values_parse() {
        assert_eq!(record("temperature", " 21.5 ").numeric_value(), Some(21.5));
        assert_eq!(record("temperature", "-3").numeric_value(), Some(-3.0));
        assert_eq!(record("temperature", "n/a").numeric_value(), None);
        assert!(record("temperature", "NaN").numeric_value().unwrap().is_nan());
    }

    #[test]
    fn groups_in_first_seen_order() {
        let records = [
            record("humidity", "80"),
            record("temperature", "20.5"),
            record("humidity", "82"),
            record("temperature", "bad"),
            record("salinity", "35"),
        ];
        let grouped = ReadingsByType::from_records(&records);

        let labels: Vec<&str> = grouped.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, ["humidity", "temperature", "salinity"]);
        assert_eq!(grouped.get("humidity"), Some(&[80.0, 82.0][..]));
        assert_eq!(grouped.get("temperature"), Some(&[20.5][..]));
        assert_eq!(grouped.total_readings(), 4);
    }

    #[test]
    fn into_requests_keeps_labels() {
        let mut grouped = ReadingsByType::new();
        grouped.push("windSpeed", 12.0);
        grouped.push("windSpeed", 14.0);

        let requests = grouped.into_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].data_type, "windSpeed");
        assert_eq!(requests[0].values, [12.0, 14.0]);
    }
}
