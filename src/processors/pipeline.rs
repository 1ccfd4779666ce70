use crate::analyzers::{AggregationResults, WeatherAggregator};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{EnrichedObservation, RawObservation};
use crate::processors::{FeatureDeriver, ImputationReport, Imputer};
use crate::utils::progress::ProgressReporter;
use tracing::{info, info_span};

/// Consumes the finished run for human-facing output.
pub trait ReportRenderer {
    fn render(&mut self, output: &PipelineOutput) -> Result<()>;
}

/// Persists the enriched table.
pub trait TableExporter {
    fn export(&mut self, table: &[EnrichedObservation]) -> Result<()>;
}

/// Result of one successful run. Read-only once built.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    head: Vec<RawObservation>,
    table: Vec<EnrichedObservation>,
    imputation: ImputationReport,
    summary: AggregationResults,
}

impl PipelineOutput {
    /// First rows of the input as ingested, before any filling.
    pub fn head(&self) -> &[RawObservation] {
        &self.head
    }

    pub fn table(&self) -> &[EnrichedObservation] {
        &self.table
    }

    pub fn imputation(&self) -> &ImputationReport {
        &self.imputation
    }

    pub fn summary(&self) -> &AggregationResults {
        &self.summary
    }

    pub fn into_table(self) -> Vec<EnrichedObservation> {
        self.table
    }
}

/// Runs impute, derive and aggregate in that order, once per call.
pub struct WeatherPipeline {
    imputer: Imputer,
    deriver: FeatureDeriver,
    aggregator: WeatherAggregator,
    head_rows: usize,
}

impl WeatherPipeline {
    pub fn new() -> Self {
        Self {
            imputer: Imputer::new(),
            deriver: FeatureDeriver::new(),
            aggregator: WeatherAggregator::new(),
            head_rows: crate::utils::constants::HEAD_PREVIEW_ROWS,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            aggregator: WeatherAggregator::new()
                .with_histogram_bins(config.rainfall_histogram_bins),
            ..Self::new()
        }
    }

    pub fn run(&self, raw: &[RawObservation]) -> Result<PipelineOutput> {
        self.run_with_progress(raw, None)
    }

    /// Run every stage, stopping at the first error. Nothing partial is
    /// returned on failure.
    pub fn run_with_progress(
        &self,
        raw: &[RawObservation],
        progress: Option<&ProgressReporter>,
    ) -> Result<PipelineOutput> {
        let span = info_span!("pipeline", rows = raw.len());
        let _enter = span.enter();

        if let Some(p) = progress {
            p.set_message("Imputing missing values...");
        }
        let imputed = self.imputer.impute(raw)?;

        if let Some(p) = progress {
            p.set_message("Deriving calendar features...");
        }
        let table = self.deriver.derive(&imputed.rows)?;

        if let Some(p) = progress {
            p.set_message("Computing summary statistics...");
        }
        let summary = self.aggregator.aggregate(&table);

        info!(rows = table.len(), "Pipeline run complete");

        Ok(PipelineOutput {
            head: raw.iter().take(self.head_rows).cloned().collect(),
            table,
            imputation: imputed.report,
            summary,
        })
    }

    /// Run the pipeline and hand the result to both collaborators. Neither
    /// collaborator is called unless every stage succeeded.
    pub fn run_and_publish(
        &self,
        raw: &[RawObservation],
        renderer: &mut dyn ReportRenderer,
        exporter: &mut dyn TableExporter,
    ) -> Result<PipelineOutput> {
        let output = self.run(raw)?;
        Self::publish(&output, renderer, exporter)?;
        Ok(output)
    }

    pub fn publish(
        output: &PipelineOutput,
        renderer: &mut dyn ReportRenderer,
        exporter: &mut dyn TableExporter,
    ) -> Result<()> {
        renderer.render(output)?;
        exporter.export(output.table())?;
        Ok(())
    }
}

impl Default for WeatherPipeline {
    fn default() -> Self {
        Self::new()
    }
}
