use crate::error::Result;
use crate::models::{CompleteObservation, EnrichedObservation, Season};
use chrono::{Datelike, NaiveDate};
use tracing::info;

/// Calendar features of a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFeatures {
    pub month: u32,
    pub year: i32,
    pub season: Season,
}

impl CalendarFeatures {
    pub fn from_date(date: NaiveDate) -> Result<Self> {
        let month = date.month();
        Ok(Self {
            month,
            year: date.year(),
            season: Season::from_month(month)?,
        })
    }
}

pub struct FeatureDeriver;

impl FeatureDeriver {
    pub fn new() -> Self {
        Self
    }

    /// Attach month, year and season to every imputed row, keeping order.
    pub fn derive(&self, rows: &[CompleteObservation]) -> Result<Vec<EnrichedObservation>> {
        let enriched = rows
            .iter()
            .map(Self::enrich)
            .collect::<Result<Vec<_>>>()?;

        info!(rows = enriched.len(), "Derived calendar features");
        Ok(enriched)
    }

    fn enrich(row: &CompleteObservation) -> Result<EnrichedObservation> {
        let features = CalendarFeatures::from_date(row.date)?;

        Ok(EnrichedObservation {
            date: row.date,
            temperature: row.temperature,
            humidity: row.humidity,
            wind_speed: row.wind_speed,
            rainfall: row.rainfall,
            month: features.month,
            year: features.year,
            season: features.season,
        })
    }
}

impl Default for FeatureDeriver {
    fn default() -> Self {
        Self::new()
    }
}
