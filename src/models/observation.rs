use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::NumericField;

/// One ingested row: a date plus four nullable readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub date: NaiveDate,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub rainfall: Option<f64>,
}

impl RawObservation {
    pub fn new(
        date: NaiveDate,
        temperature: Option<f64>,
        humidity: Option<f64>,
        wind_speed: Option<f64>,
        rainfall: Option<f64>,
    ) -> Self {
        Self {
            date,
            temperature,
            humidity,
            wind_speed,
            rainfall,
        }
    }

    pub fn value(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::Temperature => self.temperature,
            NumericField::Humidity => self.humidity,
            NumericField::WindSpeed => self.wind_speed,
            NumericField::Rainfall => self.rainfall,
        }
    }

    pub fn is_complete(&self) -> bool {
        NumericField::ALL.iter().all(|f| self.value(*f).is_some())
    }
}

/// An observation after imputation: every reading is present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompleteObservation {
    pub date: NaiveDate,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub rainfall: f64,
}

impl CompleteObservation {
    pub fn value(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Temperature => self.temperature,
            NumericField::Humidity => self.humidity,
            NumericField::WindSpeed => self.wind_speed,
            NumericField::Rainfall => self.rainfall,
        }
    }
}
