pub mod aggregator;
pub mod report;

pub use aggregator::{
    AggregationResults, ColumnStats, CorrelationMatrix, DescriptiveStats, Histogram,
    WeatherAggregator,
};
pub use report::TextReport;
