use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ids::Id;
use super::period::{deserialize_period, PeriodUnit};
use crate::error::TouchResult;
use crate::validation;

/// A person to keep in touch with, and how often.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Id<Contact>,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_period")]
    pub period: f64,
    pub period_unit: PeriodUnit,
    #[serde(alias = "country", default)]
    pub group: String,
    /// Never set by any operation; kept so stored records round-trip.
    #[serde(default)]
    pub contacted: bool,
    #[serde(
        alias = "lastContacted",
        default,
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub last_contacted_at: Option<DateTime<Utc>>,
}

impl Contact {
    /// Validate raw form input and build a never-contacted record with a fresh id.
    pub fn create(input: &NewContact) -> TouchResult<Self> {
        let name = validation::non_blank(&input.name, "name")?;
        let period = validation::period(&input.period)?;
        let period_unit = validation::non_blank(&input.period_unit, "period unit")?.parse::<PeriodUnit>()?;
        let group = validation::non_blank(&input.group, "group")?;

        Ok(Self {
            id: Id::generate(),
            name,
            period,
            period_unit,
            group,
            contacted: false,
            last_contacted_at: None,
        })
    }

    /// Human readable period, e.g. "1 day" or "2.5 hours".
    pub fn period_label(&self) -> String {
        let unit = self.period_unit.as_str();
        if self.period == 1.0 {
            format!("1 {}", unit.trim_end_matches('s'))
        } else {
            format!("{} {}", self.period, unit)
        }
    }
}

/// Give a fresh id to every contact whose id is blank or already used by an
/// earlier contact in the list. Returns how many ids were replaced.
pub fn reassign_duplicate_ids(contacts: &mut [Contact]) -> usize {
    let mut seen = HashSet::new();
    let mut reassigned = 0;
    for contact in contacts.iter_mut() {
        if contact.id.as_str().trim().is_empty() || !seen.insert(contact.id.clone()) {
            warn!(name = %contact.name, "replacing blank or duplicate contact id");
            contact.id = Id::generate();
            seen.insert(contact.id.clone());
            reassigned += 1;
        }
    }
    reassigned
}

/// Raw add-contact input, exactly as typed into a form.
#[derive(Debug, Clone, Default)]
pub struct NewContact {
    pub name: String,
    pub period: String,
    pub period_unit: String,
    pub group: String,
}

impl NewContact {
    pub fn new(name: &str, period: &str, period_unit: &str, group: &str) -> Self {
        Self {
            name: name.to_string(),
            period: period.to_string(),
            period_unit: period_unit.to_string(),
            group: group.to_string(),
        }
    }
}

/// Partial edit of a contact's recurrence.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactPatch {
    pub period: Option<f64>,
    pub period_unit: Option<PeriodUnit>,
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        self.period.is_none() && self.period_unit.is_none()
    }
}
