use crate::error::{ProcessingError, Result};
use crate::models::{CompleteObservation, NumericField, RawObservation};
use crate::utils::constants::RAINFALL_FILL_VALUE;
use crate::utils::stats;
use serde::Serialize;
use tracing::{debug, info, warn};

/// How a missing reading is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum FillPolicy {
    Mean,
    Median,
    Constant(f64),
}

/// Missing-value count and substitute for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldImputation {
    pub field: NumericField,
    pub policy: FillPolicy,
    pub missing: usize,
    pub fill_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImputationReport {
    pub total_rows: usize,
    pub fields: Vec<FieldImputation>,
}

impl ImputationReport {
    pub fn field(&self, field: NumericField) -> Option<&FieldImputation> {
        self.fields.iter().find(|f| f.field == field)
    }

    pub fn total_missing(&self) -> usize {
        self.fields.iter().map(|f| f.missing).sum()
    }
}

#[derive(Debug, Clone)]
pub struct ImputedTable {
    pub rows: Vec<CompleteObservation>,
    pub report: ImputationReport,
}

pub struct Imputer;

impl Imputer {
    pub fn new() -> Self {
        Self
    }

    pub fn policy(field: NumericField) -> FillPolicy {
        match field {
            NumericField::Temperature => FillPolicy::Mean,
            NumericField::Humidity => FillPolicy::Median,
            NumericField::WindSpeed => FillPolicy::Mean,
            NumericField::Rainfall => FillPolicy::Constant(RAINFALL_FILL_VALUE),
        }
    }

    /// Count missing readings per column without filling anything.
    pub fn missing_counts(rows: &[RawObservation]) -> Vec<(NumericField, usize)> {
        NumericField::ALL
            .into_iter()
            .map(|field| {
                let missing = rows.iter().filter(|r| r.value(field).is_none()).count();
                (field, missing)
            })
            .collect()
    }

    /// Replace every missing reading according to its column's policy.
    ///
    /// Fill values are computed from the untouched input columns before any
    /// row is rewritten. Present readings pass through unchanged, as do row
    /// order and count.
    pub fn impute(&self, rows: &[RawObservation]) -> Result<ImputedTable> {
        let mut fields = Vec::with_capacity(NumericField::ALL.len());

        for field in NumericField::ALL {
            let observed: Vec<f64> = rows.iter().filter_map(|r| r.value(field)).collect();
            let policy = Self::policy(field);
            let fill_value = Self::fill_value(field, policy, &observed)?;
            let missing = rows.len() - observed.len();

            if missing > 0 {
                warn!(
                    field = field.name(),
                    missing,
                    fill_value,
                    "Filling missing readings"
                );
            } else {
                debug!(field = field.name(), fill_value, "No missing readings");
            }

            fields.push(FieldImputation {
                field,
                policy,
                missing,
                fill_value,
            });
        }

        let fill = |field: NumericField| fields[field.index()].fill_value;
        let completed = rows
            .iter()
            .map(|r| CompleteObservation {
                date: r.date,
                temperature: r.temperature.unwrap_or(fill(NumericField::Temperature)),
                humidity: r.humidity.unwrap_or(fill(NumericField::Humidity)),
                wind_speed: r.wind_speed.unwrap_or(fill(NumericField::WindSpeed)),
                rainfall: r.rainfall.unwrap_or(fill(NumericField::Rainfall)),
            })
            .collect::<Vec<_>>();

        let report = ImputationReport {
            total_rows: rows.len(),
            fields,
        };
        info!(
            rows = completed.len(),
            filled = report.total_missing(),
            "Imputation complete"
        );

        Ok(ImputedTable {
            rows: completed,
            report,
        })
    }

    fn fill_value(field: NumericField, policy: FillPolicy, observed: &[f64]) -> Result<f64> {
        let value = match policy {
            FillPolicy::Constant(value) => Some(value),
            FillPolicy::Mean => stats::mean(observed),
            FillPolicy::Median => stats::median(observed),
        };

        value.ok_or(ProcessingError::EmptyColumn {
            field: field.name(),
        })
    }
}

impl Default for Imputer {
    fn default() -> Self {
        Self::new()
    }
}
