use crate::analyzers::AggregationResults;
use crate::error::{ProcessingError, Result};
use crate::processors::{ImputationReport, PipelineOutput};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

#[derive(Serialize)]
struct SummaryDocument<'a> {
    rows: usize,
    imputation: &'a ImputationReport,
    summary: &'a AggregationResults,
}

/// Serializes the imputation report and aggregation results as JSON.
/// NaN statistics are written as `null`.
pub struct SummaryWriter;

impl SummaryWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn to_json(&self, output: &PipelineOutput) -> Result<String> {
        let document = SummaryDocument {
            rows: output.table().len(),
            imputation: output.imputation(),
            summary: output.summary(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Serialize into a temporary file beside `path` without touching
    /// `path` itself. Nothing is visible at `path` until the returned
    /// summary is committed.
    pub fn stage(&self, output: &PipelineOutput, path: &Path) -> Result<StagedSummary> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        let json = self.to_json(output)?;
        let mut temp = NamedTempFile::new_in(&parent)?;
        temp.write_all(json.as_bytes())?;
        temp.flush()?;

        Ok(StagedSummary {
            temp,
            path: path.to_path_buf(),
        })
    }

    pub fn write(&self, output: &PipelineOutput, path: &Path) -> Result<()> {
        self.stage(output, path)?.commit()
    }
}

/// A fully written summary waiting to be moved into place.
/// Dropping it discards the temporary file.
pub struct StagedSummary {
    temp: NamedTempFile,
    path: PathBuf,
}

impl StagedSummary {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn commit(self) -> Result<()> {
        self.temp
            .persist(&self.path)
            .map_err(|e| ProcessingError::Io(e.error))?;
        info!(path = %self.path.display(), "Wrote summary JSON");
        Ok(())
    }
}

impl Default for SummaryWriter {
    fn default() -> Self {
        Self::new()
    }
}
