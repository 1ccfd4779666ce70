use crate::error::{ProcessingError, Result};
use crate::models::{NumericField, RawObservation};
use crate::utils::constants::{DATE_COLUMN, DEFAULT_DATE_FORMATS, MISSING_TOKENS};
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;
use tracing::{debug, warn};

/// Reads the `Date, Temperature, Humidity, WindSpeed, Rainfall` table into
/// raw observations. Column order is free and extra columns are ignored.
pub struct ObservationReader {
    date_formats: Vec<String>,
}

/// Positions of the required columns within a header row.
struct ColumnIndex {
    date: usize,
    fields: [usize; 4],
}

impl ObservationReader {
    pub fn new() -> Self {
        Self {
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn with_date_formats(date_formats: Vec<String>) -> Self {
        Self { date_formats }
    }

    pub fn read_path(&self, path: &Path) -> Result<Vec<RawObservation>> {
        let bytes = std::fs::read(path)?;
        self.read_bytes(&bytes)
    }

    /// Decode raw file bytes and parse them. UTF-8 (with or without BOM) is
    /// expected; undecodable input is retried as Windows-1252.
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<Vec<RawObservation>> {
        let (text, encoding, had_errors) = encoding_rs::UTF_8.decode(bytes);
        if !had_errors {
            debug!(encoding = encoding.name(), "Decoded input");
            return self.read_str(&text);
        }

        warn!("Input is not valid UTF-8, decoding as Windows-1252");
        let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
        self.read_str(&text)
    }

    pub fn read_str(&self, content: &str) -> Result<Vec<RawObservation>> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(content.as_bytes());

        let columns = Self::locate_columns(reader.headers()?)?;
        let mut observations = Vec::new();

        for (row, record) in reader.records().enumerate() {
            let record = record?;
            observations.push(self.parse_record(&record, row, &columns)?);
        }

        debug!(rows = observations.len(), "Parsed observation table");
        Ok(observations)
    }

    fn locate_columns(headers: &StringRecord) -> Result<ColumnIndex> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ProcessingError::MissingColumn(name.to_string()))
        };

        Ok(ColumnIndex {
            date: find(DATE_COLUMN)?,
            fields: [
                find(NumericField::Temperature.column_header())?,
                find(NumericField::Humidity.column_header())?,
                find(NumericField::WindSpeed.column_header())?,
                find(NumericField::Rainfall.column_header())?,
            ],
        })
    }

    fn parse_record(
        &self,
        record: &StringRecord,
        row: usize,
        columns: &ColumnIndex,
    ) -> Result<RawObservation> {
        let raw_date = record.get(columns.date).unwrap_or("");
        let date = self
            .parse_date(raw_date)
            .ok_or_else(|| ProcessingError::MalformedDate {
                row,
                value: raw_date.to_string(),
            })?;

        let mut values = [None; 4];
        for field in NumericField::ALL {
            let cell = record.get(columns.fields[field.index()]).unwrap_or("");
            values[field.index()] = Self::parse_value(cell, field, row)?;
        }

        Ok(RawObservation::new(
            date, values[0], values[1], values[2], values[3],
        ))
    }

    /// Parse a date using the configured formats, accepting date-time values
    /// by discarding the time of day.
    pub fn parse_date(&self, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        for format in &self.date_formats {
            if let Ok(date) = NaiveDate::parse_from_str(value, format) {
                return Some(date);
            }
            if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
                return Some(datetime.date());
            }
        }
        None
    }

    fn parse_value(cell: &str, field: NumericField, row: usize) -> Result<Option<f64>> {
        if MISSING_TOKENS.contains(&cell) {
            return Ok(None);
        }

        match cell.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => Err(ProcessingError::InvalidFormat(format!(
                "Invalid {} value '{}' in row {}",
                field.name(),
                cell,
                row
            ))),
        }
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}
