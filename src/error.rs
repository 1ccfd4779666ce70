use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed date '{value}' in row {row}")]
    MalformedDate { row: usize, value: String },

    #[error("Column '{field}' has no non-missing values; fill statistic is undefined")]
    EmptyColumn { field: &'static str },

    #[error("Month {month} is outside 1-12; cannot assign a season")]
    InvalidSeasonInput { month: u32 },

    #[error("Required column '{0}' not found in input header")]
    MissingColumn(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
