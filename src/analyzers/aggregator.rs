use crate::models::{EnrichedObservation, NumericField, Season};
use crate::utils::constants::{DEFAULT_HISTOGRAM_BINS, MONTH_COLUMN, YEAR_COLUMN};
use crate::utils::stats;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Count, moments and five-number summary of one column.
///
/// Statistics that are undefined for the sample size are NaN, e.g. `std`
/// for a single value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl DescriptiveStats {
    pub fn from_values(values: &[f64]) -> Self {
        let sorted = stats::sorted_copy(values);
        let q = |p: f64| stats::quantile_sorted(&sorted, p).unwrap_or(f64::NAN);

        Self {
            count: values.len(),
            mean: stats::mean(values).unwrap_or(f64::NAN),
            std: stats::sample_std(values).unwrap_or(f64::NAN),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q25: q(0.25),
            median: q(0.5),
            q75: q(0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: String,
    pub stats: DescriptiveStats,
}

/// Pairwise Pearson coefficients of the four measured columns, indexed in
/// `NumericField::ALL` order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub fields: [NumericField; 4],
    pub values: [[f64; 4]; 4],
}

impl CorrelationMatrix {
    /// Off-diagonal entries involving a constant column are NaN; the
    /// diagonal is always 1.0.
    pub fn from_table(table: &[EnrichedObservation]) -> Self {
        let columns: Vec<Vec<f64>> = NumericField::ALL
            .iter()
            .map(|f| table.iter().map(|r| r.value(*f)).collect())
            .collect();

        let mut values = [[f64::NAN; 4]; 4];
        for i in 0..4 {
            values[i][i] = 1.0;
            for j in (i + 1)..4 {
                let r = stats::pearson(&columns[i], &columns[j]).unwrap_or(f64::NAN);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Self {
            fields: NumericField::ALL,
            values,
        }
    }

    pub fn get(&self, a: NumericField, b: NumericField) -> f64 {
        self.values[a.index()][b.index()]
    }
}

/// Equal-width histogram; the last bin is closed on the right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let (mut min, mut max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });

        if values.is_empty() {
            min = 0.0;
            max = 1.0;
        } else if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let bin_width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for v in values {
            let idx = (((v - min) / bin_width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Self {
            min,
            max,
            bin_width,
            counts,
        }
    }

    /// Left edge of every bin followed by the right edge of the last one.
    pub fn edges(&self) -> Vec<f64> {
        (0..=self.counts.len())
            .map(|i| self.min + i as f64 * self.bin_width)
            .collect()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Everything the aggregation stage hands to reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResults {
    pub descriptive_stats: Vec<ColumnStats>,
    pub monthly_mean_temperature: BTreeMap<u32, f64>,
    pub yearly_total_rainfall: BTreeMap<i32, f64>,
    pub correlation_matrix: CorrelationMatrix,
    pub seasonal_temperature: BTreeMap<Season, DescriptiveStats>,
    pub rainfall_histogram: Histogram,
}

impl AggregationResults {
    pub fn stats_for(&self, column: &str) -> Option<&DescriptiveStats> {
        self.descriptive_stats
            .iter()
            .find(|c| c.column == column)
            .map(|c| &c.stats)
    }
}

pub struct WeatherAggregator {
    histogram_bins: usize,
}

impl WeatherAggregator {
    pub fn new() -> Self {
        Self {
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }

    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    /// Summarize an enriched table. Grouping uses the derived `month` and
    /// `year` columns as they are.
    pub fn aggregate(&self, table: &[EnrichedObservation]) -> AggregationResults {
        let results = AggregationResults {
            descriptive_stats: self.descriptive_stats(table),
            monthly_mean_temperature: self.monthly_mean_temperature(table),
            yearly_total_rainfall: self.yearly_total_rainfall(table),
            correlation_matrix: CorrelationMatrix::from_table(table),
            seasonal_temperature: self.seasonal_temperature(table),
            rainfall_histogram: Histogram::from_values(
                &column(table, |r| r.rainfall),
                self.histogram_bins,
            ),
        };

        info!(
            rows = table.len(),
            months = results.monthly_mean_temperature.len(),
            years = results.yearly_total_rainfall.len(),
            "Aggregation complete"
        );
        results
    }

    pub fn descriptive_stats(&self, table: &[EnrichedObservation]) -> Vec<ColumnStats> {
        let mut summary: Vec<ColumnStats> = NumericField::ALL
            .iter()
            .map(|f| ColumnStats {
                column: f.column_header().to_string(),
                stats: DescriptiveStats::from_values(&column(table, |r| r.value(*f))),
            })
            .collect();

        summary.push(ColumnStats {
            column: MONTH_COLUMN.to_string(),
            stats: DescriptiveStats::from_values(&column(table, |r| r.month as f64)),
        });
        summary.push(ColumnStats {
            column: YEAR_COLUMN.to_string(),
            stats: DescriptiveStats::from_values(&column(table, |r| r.year as f64)),
        });

        summary
    }

    pub fn monthly_mean_temperature(&self, table: &[EnrichedObservation]) -> BTreeMap<u32, f64> {
        let mut sums: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
        for record in table {
            let entry = sums.entry(record.month).or_insert((0.0, 0));
            entry.0 += record.temperature;
            entry.1 += 1;
        }

        sums.into_iter()
            .map(|(month, (sum, count))| (month, sum / count as f64))
            .collect()
    }

    pub fn yearly_total_rainfall(&self, table: &[EnrichedObservation]) -> BTreeMap<i32, f64> {
        let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
        for record in table {
            *totals.entry(record.year).or_insert(0.0) += record.rainfall;
        }
        totals
    }

    pub fn seasonal_temperature(
        &self,
        table: &[EnrichedObservation],
    ) -> BTreeMap<Season, DescriptiveStats> {
        let mut groups: BTreeMap<Season, Vec<f64>> = BTreeMap::new();
        for record in table {
            groups
                .entry(record.season)
                .or_default()
                .push(record.temperature);
        }

        groups
            .into_iter()
            .map(|(season, temps)| (season, DescriptiveStats::from_values(&temps)))
            .collect()
    }
}

impl Default for WeatherAggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn column<F>(table: &[EnrichedObservation], f: F) -> Vec<f64>
where
    F: Fn(&EnrichedObservation) -> f64,
{
    table.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(y: i32, m: u32, d: u32, t: f64, h: f64, w: f64, r: f64) -> EnrichedObservation {
        EnrichedObservation {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            temperature: t,
            humidity: h,
            wind_speed: w,
            rainfall: r,
            month: m,
            year: y,
            season: Season::from_month(m).unwrap(),
        }
    }

    fn sample_table() -> Vec<EnrichedObservation> {
        vec![
            record(2022, 1, 5, 12.0, 80.0, 4.0, 0.0),
            record(2022, 1, 6, 14.0, 75.0, 5.0, 1.0),
            record(2022, 7, 1, 31.0, 90.0, 7.0, 25.0),
            record(2023, 7, 2, 29.0, 88.0, 6.5, 18.0),
            record(2023, 10, 3, 24.0, 70.0, 3.0, 2.5),
        ]
    }

    #[test]
    fn test_descriptive_stats_match_describe() {
        let stats = DescriptiveStats::from_values(&[1.0, 2.0, 3.0, 4.0]);

        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 2.5);
        assert!((stats.std - 1.290_994_448_7).abs() < 1e-9);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q25, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q75, 3.25);
        assert_eq!(stats.max, 4.0);
    }

    #[test]
    fn test_descriptive_stats_single_value() {
        let stats = DescriptiveStats::from_values(&[7.0]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 7.0);
        assert!(stats.std.is_nan());
        assert_eq!(stats.median, 7.0);
    }

    #[test]
    fn test_descriptive_stats_columns() {
        let table = sample_table();
        let summary = WeatherAggregator::new().descriptive_stats(&table);

        let names: Vec<&str> = summary.iter().map(|c| c.column.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Temperature",
                "Humidity",
                "WindSpeed",
                "Rainfall",
                "Month",
                "Year"
            ]
        );
        assert!(summary.iter().all(|c| c.stats.count == table.len()));
        assert_eq!(summary[0].stats.max, 31.0);
        assert_eq!(summary[5].stats.min, 2022.0);
    }

    #[test]
    fn test_monthly_mean_combines_years() {
        let means = WeatherAggregator::new().monthly_mean_temperature(&sample_table());

        assert_eq!(means.keys().copied().collect::<Vec<_>>(), vec![1, 7, 10]);
        assert_eq!(means[&1], 13.0);
        assert_eq!(means[&7], 30.0);
        assert_eq!(means[&10], 24.0);
    }

    #[test]
    fn test_yearly_total_rainfall() {
        let totals = WeatherAggregator::new().yearly_total_rainfall(&sample_table());

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&2022], 26.0);
        assert_eq!(totals[&2023], 20.5);
    }

    #[test]
    fn test_correlation_matrix_shape() {
        let matrix = CorrelationMatrix::from_table(&sample_table());

        for a in NumericField::ALL {
            assert_eq!(matrix.get(a, a), 1.0);
            for b in NumericField::ALL {
                assert_eq!(matrix.get(a, b), matrix.get(b, a));
                let r = matrix.get(a, b);
                assert!((-1.0..=1.0).contains(&r));
            }
        }
        assert!(matrix.get(NumericField::Temperature, NumericField::Rainfall) > 0.8);
    }

    #[test]
    fn test_correlation_with_constant_column() {
        let table = vec![
            record(2022, 1, 1, 10.0, 50.0, 3.0, 0.0),
            record(2022, 1, 2, 12.0, 55.0, 3.0, 0.0),
            record(2022, 1, 3, 14.0, 65.0, 3.0, 0.0),
        ];
        let matrix = CorrelationMatrix::from_table(&table);

        assert_eq!(matrix.get(NumericField::WindSpeed, NumericField::WindSpeed), 1.0);
        assert!(matrix
            .get(NumericField::Temperature, NumericField::WindSpeed)
            .is_nan());
    }

    #[test]
    fn test_seasonal_temperature_groups() {
        let seasons = WeatherAggregator::new().seasonal_temperature(&sample_table());

        assert_eq!(
            seasons.keys().copied().collect::<Vec<_>>(),
            vec![Season::Winter, Season::Monsoon, Season::Autumn]
        );
        assert_eq!(seasons[&Season::Winter].mean, 13.0);
        assert_eq!(seasons[&Season::Monsoon].count, 2);
    }

    #[test]
    fn test_histogram_bins() {
        let hist = Histogram::from_values(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);

        assert_eq!(hist.counts, vec![1, 1, 1, 2]);
        assert_eq!(hist.bin_width, 1.0);
        assert_eq!(hist.edges(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(hist.total(), 5);
    }

    #[test]
    fn test_histogram_constant_and_empty() {
        let constant = Histogram::from_values(&[2.0, 2.0], 2);
        assert_eq!(constant.min, 1.5);
        assert_eq!(constant.max, 2.5);
        assert_eq!(constant.counts, vec![0, 2]);

        let empty = Histogram::from_values(&[], 3);
        assert_eq!(empty.total(), 0);
        assert_eq!(empty.counts.len(), 3);
    }

    #[test]
    fn test_aggregate_uses_configured_bins() {
        let results = WeatherAggregator::new()
            .with_histogram_bins(5)
            .aggregate(&sample_table());

        assert_eq!(results.rainfall_histogram.counts.len(), 5);
        assert_eq!(results.rainfall_histogram.total(), 5);
        assert_eq!(results.stats_for("Humidity").unwrap().max, 90.0);
        assert!(results.stats_for("Pressure").is_none());
    }
}
