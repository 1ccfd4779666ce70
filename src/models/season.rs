use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ProcessingError, Result};

/// Four-way seasonal category derived from the calendar month.
///
/// The classification follows the South Asian climate calendar rather than
/// the meteorological four seasons: a long monsoon (June-September) and a
/// short post-monsoon autumn (October-November).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Summer,
    Monsoon,
    Autumn,
}

impl Season {
    pub const ALL: [Season; 4] = [
        Season::Winter,
        Season::Summer,
        Season::Monsoon,
        Season::Autumn,
    ];

    /// Map a month number to its season.
    ///
    /// Every month in 1..=12 belongs to exactly one season. Anything else
    /// means the date decomposition upstream is broken.
    pub fn from_month(month: u32) -> Result<Self> {
        match month {
            12 | 1 | 2 => Ok(Season::Winter),
            3..=5 => Ok(Season::Summer),
            6..=9 => Ok(Season::Monsoon),
            10 | 11 => Ok(Season::Autumn),
            _ => Err(ProcessingError::InvalidSeasonInput { month }),
        }
    }

    pub fn months(&self) -> &'static [u32] {
        match self {
            Season::Winter => &[12, 1, 2],
            Season::Summer => &[3, 4, 5],
            Season::Monsoon => &[6, 7, 8, 9],
            Season::Autumn => &[10, 11],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Summer => "Summer",
            Season::Monsoon => "Monsoon",
            Season::Autumn => "Autumn",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Season::ALL.into_iter().find(|season| season.as_str() == s)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
