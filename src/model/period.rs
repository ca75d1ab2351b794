use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::TouchError;
use crate::validation;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Unit a reminder period is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Minutes,
    Hours,
    Days,
}

impl PeriodUnit {
    /// Display order used by pickers: longest unit first.
    pub const ALL: [PeriodUnit; 3] = [PeriodUnit::Days, PeriodUnit::Hours, PeriodUnit::Minutes];

    /// Length of one unit in milliseconds.
    pub fn millis(self) -> i64 {
        match self {
            PeriodUnit::Minutes => MINUTE_MS,
            PeriodUnit::Hours => HOUR_MS,
            PeriodUnit::Days => DAY_MS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PeriodUnit::Minutes => "minutes",
            PeriodUnit::Hours => "hours",
            PeriodUnit::Days => "days",
        }
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodUnit {
    type Err = TouchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minutes" | "minute" | "min" | "m" => Ok(PeriodUnit::Minutes),
            "hours" | "hour" | "h" => Ok(PeriodUnit::Hours),
            "days" | "day" | "d" => Ok(PeriodUnit::Days),
            _ => Err(TouchError::UnknownPeriodUnit(s.trim().to_string())),
        }
    }
}

/// Reads a period stored either as a JSON number or as a numeric string.
/// Older clients saved the raw text of the period input field, so a record
/// may hold blank or half-typed text. Blank text reads as `0.0`, which is
/// always due. Other non-numeric text reads as NaN, which never comes due
/// after a contact, so one bad record cannot fail the whole list. A NaN
/// period is written back as `null` and read back as NaN.
pub(crate) fn deserialize_period<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null,
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) if s.trim().is_empty() => 0.0,
        Raw::Text(s) => validation::number(&s, "period").unwrap_or_else(|e| {
            warn!(error = %e, "unreadable stored period, reading it as NaN");
            f64::NAN
        }),
        Raw::Null => f64::NAN,
    })
}
