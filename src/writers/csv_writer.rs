use crate::error::{ProcessingError, Result};
use crate::models::EnrichedObservation;
use crate::processors::TableExporter;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;
use validator::Validate;

/// Writes the enriched table as CSV with the columns
/// `Date, Temperature, Humidity, WindSpeed, Rainfall, Month, Year, Season`.
///
/// Output goes to a temporary file beside the target and is renamed into
/// place once complete, so a failed write never leaves a partial file.
pub struct CsvWriter {
    output_path: PathBuf,
}

impl CsvWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn write_records(&self, records: &[EnrichedObservation], path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        let temp = NamedTempFile::new_in(&parent)?;
        {
            let mut writer = csv::Writer::from_writer(temp.as_file());
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }

        temp.persist(path)
            .map_err(|e| ProcessingError::Io(e.error))?;

        info!(rows = records.len(), path = %path.display(), "Wrote enriched table");
        Ok(())
    }

    /// Read an exported table back, rejecting rows with an impossible month.
    pub fn read_records(&self, path: &Path) -> Result<Vec<EnrichedObservation>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: EnrichedObservation = result?;
            record.validate()?;
            records.push(record);
        }
        Ok(records)
    }
}

impl TableExporter for CsvWriter {
    fn export(&mut self, table: &[EnrichedObservation]) -> Result<()> {
        self.write_records(table, &self.output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Season;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample() -> Vec<EnrichedObservation> {
        vec![
            EnrichedObservation {
                date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
                temperature: 10.0,
                humidity: 80.0,
                wind_speed: 5.0,
                rainfall: 0.0,
                month: 1,
                year: 2023,
                season: Season::Winter,
            },
            EnrichedObservation {
                date: NaiveDate::from_ymd_opt(2023, 7, 10).unwrap(),
                temperature: 30.5,
                humidity: 60.0,
                wind_speed: 6.25,
                rainfall: 5.0,
                month: 7,
                year: 2023,
                season: Season::Monsoon,
            },
        ]
    }

    #[test]
    fn test_export_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.csv");

        let mut writer = CsvWriter::new(&path);
        writer.export(&sample()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "Date,Temperature,Humidity,WindSpeed,Rainfall,Month,Year,Season"
        );
        assert_eq!(lines[1], "2023-01-15,10.0,80.0,5.0,0.0,1,2023,Winter");
        assert_eq!(lines[2], "2023-07-10,30.5,60.0,6.25,5.0,7,2023,Monsoon");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_read_back_written_records() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("out.csv");
        let writer = CsvWriter::new(&path);

        writer.write_records(&sample(), &path)?;
        let records = writer.read_records(&path)?;

        assert_eq!(records, sample());
        Ok(())
    }

    #[test]
    fn test_no_leftover_temp_files() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("out.csv");
        CsvWriter::new(&path).write_records(&sample(), &path)?;

        let entries = std::fs::read_dir(dir.path())?.count();
        assert_eq!(entries, 1);
        Ok(())
    }
}
