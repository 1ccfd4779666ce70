use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{NumericField, Season};

/// A fully imputed observation with its calendar features.
///
/// Serialized field names are the export column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EnrichedObservation {
    #[serde(rename = "Date")]
    pub date: NaiveDate,

    #[serde(rename = "Temperature")]
    pub temperature: f64,

    #[serde(rename = "Humidity")]
    pub humidity: f64,

    #[serde(rename = "WindSpeed")]
    pub wind_speed: f64,

    #[serde(rename = "Rainfall")]
    pub rainfall: f64,

    #[serde(rename = "Month")]
    #[validate(range(min = 1, max = 12))]
    pub month: u32,

    #[serde(rename = "Year")]
    pub year: i32,

    #[serde(rename = "Season")]
    pub season: Season,
}

impl EnrichedObservation {
    pub fn value(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Temperature => self.temperature,
            NumericField::Humidity => self.humidity,
            NumericField::WindSpeed => self.wind_speed,
            NumericField::Rainfall => self.rainfall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EnrichedObservation {
        EnrichedObservation {
            date: NaiveDate::from_ymd_opt(2023, 7, 10).unwrap(),
            temperature: 30.0,
            humidity: 60.0,
            wind_speed: 6.0,
            rainfall: 5.0,
            month: 7,
            year: 2023,
            season: Season::Monsoon,
        }
    }

    #[test]
    fn test_value_accessor() {
        let record = sample();
        assert_eq!(record.value(NumericField::Temperature), 30.0);
        assert_eq!(record.value(NumericField::Rainfall), 5.0);
    }

    #[test]
    fn test_month_range_validation() {
        let mut record = sample();
        assert!(record.validate().is_ok());

        record.month = 13;
        assert!(record.validate().is_err());
    }
}
