use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_DATE_FORMATS, DEFAULT_FLOAT_PRECISION, DEFAULT_HISTOGRAM_BINS, DEFAULT_OUTPUT_FILE,
    ENV_PREFIX,
};

/// Run settings, layered as defaults, then an optional config file, then
/// `WEATHER_PREP_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PipelineConfig {
    /// Number of equal-width bins in the rainfall histogram.
    #[validate(range(min = 1, max = 1000))]
    pub rainfall_histogram_bins: usize,

    /// chrono format strings accepted for the Date column, tried in order.
    #[validate(length(min = 1))]
    pub date_formats: Vec<String>,

    pub output_file: PathBuf,

    /// Decimal places in the text report.
    #[validate(range(max = 10))]
    pub float_precision: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rainfall_histogram_bins: DEFAULT_HISTOGRAM_BINS,
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            float_precision: DEFAULT_FLOAT_PRECISION,
        }
    }
}

impl PipelineConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default(
                "rainfall_histogram_bins",
                defaults.rainfall_histogram_bins as i64,
            )?
            .set_default("date_formats", defaults.date_formats.clone())?
            .set_default(
                "output_file",
                defaults.output_file.to_string_lossy().into_owned(),
            )?
            .set_default("float_precision", defaults.float_precision as i64)?;

        if let Some(path) = path {
            debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("date_formats"),
        );

        let settings: PipelineConfig = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rainfall_histogram_bins, 20);
        assert_eq!(config.output_file, PathBuf::from("weather_analysis_output.csv"));
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "rainfall_histogram_bins = 8").unwrap();
        writeln!(file, "output_file = \"out/clean.csv\"").unwrap();

        let config = PipelineConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.rainfall_histogram_bins, 8);
        assert_eq!(config.output_file, PathBuf::from("out/clean.csv"));
        assert_eq!(config.float_precision, 2);
        assert_eq!(config.date_formats.len(), DEFAULT_DATE_FORMATS.len());
    }

    #[test]
    fn test_zero_bins_rejected() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "rainfall_histogram_bins = 0").unwrap();

        assert!(PipelineConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let path = Path::new("/nonexistent/weather-prep.toml");
        assert!(PipelineConfig::load(Some(path)).is_err());
    }
}
