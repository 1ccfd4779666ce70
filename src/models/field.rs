use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::constants::{
    HUMIDITY_COLUMN, RAINFALL_COLUMN, TEMPERATURE_COLUMN, WIND_SPEED_COLUMN,
};

/// The four measured columns of an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Temperature,
    Humidity,
    WindSpeed,
    Rainfall,
}

impl NumericField {
    pub const ALL: [NumericField; 4] = [
        NumericField::Temperature,
        NumericField::Humidity,
        NumericField::WindSpeed,
        NumericField::Rainfall,
    ];

    /// Snake-case field name, used in error messages and JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            NumericField::Temperature => "temperature",
            NumericField::Humidity => "humidity",
            NumericField::WindSpeed => "wind_speed",
            NumericField::Rainfall => "rainfall",
        }
    }

    /// Column header used in the tabular input and export files.
    pub fn column_header(&self) -> &'static str {
        match self {
            NumericField::Temperature => TEMPERATURE_COLUMN,
            NumericField::Humidity => HUMIDITY_COLUMN,
            NumericField::WindSpeed => WIND_SPEED_COLUMN,
            NumericField::Rainfall => RAINFALL_COLUMN,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_header())
    }
}
