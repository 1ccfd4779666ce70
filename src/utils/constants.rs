/// Input column names
pub const DATE_COLUMN: &str = "Date";
pub const TEMPERATURE_COLUMN: &str = "Temperature";
pub const HUMIDITY_COLUMN: &str = "Humidity";
pub const WIND_SPEED_COLUMN: &str = "WindSpeed";
pub const RAINFALL_COLUMN: &str = "Rainfall";

/// Derived column names
pub const MONTH_COLUMN: &str = "Month";
pub const YEAR_COLUMN: &str = "Year";
pub const SEASON_COLUMN: &str = "Season";

/// Cell contents treated as a missing reading
pub const MISSING_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Accepted input date formats, tried in order
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Rainfall substituted for a missing reading (mm)
pub const RAINFALL_FILL_VALUE: f64 = 0.0;

/// Processing defaults
pub const DEFAULT_OUTPUT_FILE: &str = "weather_analysis_output.csv";
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;
pub const DEFAULT_FLOAT_PRECISION: usize = 2;
pub const HEAD_PREVIEW_ROWS: usize = 5;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "WEATHER_PREP";
