use crate::analyzers::{AggregationResults, DescriptiveStats};
use crate::error::Result;
use crate::models::{NumericField, RawObservation};
use crate::processors::{FillPolicy, ImputationReport, PipelineOutput, ReportRenderer};
use crate::utils::constants::DEFAULT_FLOAT_PRECISION;
use std::fmt::Write as _;
use std::io::Write;

/// Plain-text rendering of a pipeline run.
pub struct TextReport<W: Write> {
    writer: W,
    precision: usize,
}

impl<W: Write> TextReport<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            precision: DEFAULT_FLOAT_PRECISION,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn generate(&self, output: &PipelineOutput) -> String {
        let mut report = String::new();

        self.push_head(&mut report, output.head());
        self.push_imputation(&mut report, output.imputation());
        self.push_summary(&mut report, output.summary());

        report
    }

    fn num(&self, value: f64) -> String {
        if value.is_nan() {
            "NaN".to_string()
        } else {
            format!("{:.*}", self.precision, value)
        }
    }

    fn opt(&self, value: Option<f64>) -> String {
        value.map_or_else(|| "NaN".to_string(), |v| self.num(v))
    }

    fn push_head(&self, report: &mut String, head: &[RawObservation]) {
        let _ = writeln!(report, "=== First {} Records ===", head.len());
        let _ = writeln!(
            report,
            "{:<12} {:>12} {:>12} {:>12} {:>12}",
            "Date", "Temperature", "Humidity", "WindSpeed", "Rainfall"
        );
        for row in head {
            let _ = writeln!(
                report,
                "{:<12} {:>12} {:>12} {:>12} {:>12}",
                row.date.to_string(),
                self.opt(row.temperature),
                self.opt(row.humidity),
                self.opt(row.wind_speed),
                self.opt(row.rainfall)
            );
        }
    }

    fn push_imputation(&self, report: &mut String, imputation: &ImputationReport) {
        let _ = writeln!(report, "\n=== Missing Values ===");
        for field in &imputation.fields {
            let policy = match field.policy {
                FillPolicy::Mean => "mean".to_string(),
                FillPolicy::Median => "median".to_string(),
                FillPolicy::Constant(_) => "constant".to_string(),
            };
            let _ = writeln!(
                report,
                "{:<12} {:>6} missing, filled with {} ({})",
                field.field.column_header(),
                field.missing,
                self.num(field.fill_value),
                policy
            );
        }
        let _ = writeln!(
            report,
            "Total: {} missing values across {} rows",
            imputation.total_missing(),
            imputation.total_rows
        );
    }

    fn push_summary(&self, report: &mut String, summary: &AggregationResults) {
        let _ = writeln!(report, "\n=== Basic Statistics ===");
        let _ = writeln!(
            report,
            "{:<12} {:>8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            "", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        );
        for column in &summary.descriptive_stats {
            self.push_stats_row(report, &column.column, &column.stats);
        }

        let _ = writeln!(report, "\n=== Average Temperature by Month ===");
        for (month, mean) in &summary.monthly_mean_temperature {
            let _ = writeln!(report, "{:>2}  {}", month, self.num(*mean));
        }

        let _ = writeln!(report, "\n=== Total Rainfall by Year ===");
        for (year, total) in &summary.yearly_total_rainfall {
            let _ = writeln!(report, "{}  {}", year, self.num(*total));
        }

        let _ = writeln!(report, "\n=== Correlation Matrix ===");
        let _ = write!(report, "{:<12}", "");
        for field in NumericField::ALL {
            let _ = write!(report, " {:>12}", field.column_header());
        }
        let _ = writeln!(report);
        for a in NumericField::ALL {
            let _ = write!(report, "{:<12}", a.column_header());
            for b in NumericField::ALL {
                let _ = write!(
                    report,
                    " {:>12}",
                    self.num(summary.correlation_matrix.get(a, b))
                );
            }
            let _ = writeln!(report);
        }

        let _ = writeln!(report, "\n=== Temperature by Season ===");
        for (season, stats) in &summary.seasonal_temperature {
            self.push_stats_row(report, season.as_str(), stats);
        }

        let hist = &summary.rainfall_histogram;
        let _ = writeln!(report, "\n=== Rainfall Distribution ===");
        let edges = hist.edges();
        for (i, count) in hist.counts.iter().enumerate() {
            let _ = writeln!(
                report,
                "[{:>10}, {:>10}{} {:>6}",
                self.num(edges[i]),
                self.num(edges[i + 1]),
                if i + 1 == hist.counts.len() { "]" } else { ")" },
                count
            );
        }
    }

    fn push_stats_row(&self, report: &mut String, label: &str, stats: &DescriptiveStats) {
        let _ = writeln!(
            report,
            "{:<12} {:>8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            label,
            stats.count,
            self.num(stats.mean),
            self.num(stats.std),
            self.num(stats.min),
            self.num(stats.q25),
            self.num(stats.median),
            self.num(stats.q75),
            self.num(stats.max)
        );
    }
}

impl<W: Write> ReportRenderer for TextReport<W> {
    fn render(&mut self, output: &PipelineOutput) -> Result<()> {
        let report = self.generate(output);
        self.writer.write_all(report.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}
