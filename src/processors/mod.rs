pub mod feature_deriver;
pub mod imputer;
pub mod pipeline;

pub use feature_deriver::FeatureDeriver;
pub use imputer::{FieldImputation, FillPolicy, ImputationReport, ImputedTable, Imputer};
pub use pipeline::{PipelineOutput, ReportRenderer, TableExporter, WeatherPipeline};
