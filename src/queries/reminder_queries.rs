use chrono::{DateTime, Duration, Utc};

use crate::model::{Contact, PeriodUnit};

/// Length of a reminder interval in milliseconds. No rounding.
pub fn interval_millis(period: f64, unit: PeriodUnit) -> f64 {
    period * unit.millis() as f64
}

/// Whether someone last contacted at `last_contacted_at` is due again at `now`.
///
/// Never-contacted is always due. Otherwise due once the elapsed time reaches
/// the interval, so exactly one interval later counts as due. A zero or
/// negative period is always due.
pub fn is_due(
    last_contacted_at: Option<DateTime<Utc>>,
    period: f64,
    unit: PeriodUnit,
    now: DateTime<Utc>,
) -> bool {
    match last_contacted_at {
        None => true,
        Some(at) => (now - at).num_milliseconds() as f64 >= interval_millis(period, unit),
    }
}

pub fn contact_is_due(contact: &Contact, now: DateTime<Utc>) -> bool {
    is_due(contact.last_contacted_at, contact.period, contact.period_unit, now)
}

/// Every record when `group` is absent or blank, otherwise exact matches only.
pub fn filter_by_group<'a>(list: &'a [Contact], group: Option<&str>) -> Vec<&'a Contact> {
    match group.map(str::trim).filter(|g| !g.is_empty()) {
        None => list.iter().collect(),
        Some(g) => list.iter().filter(|c| c.group == g).collect(),
    }
}

/// Contacts to reach out to at `now`, in list order.
pub fn due_list(list: &[Contact], now: DateTime<Utc>) -> Vec<&Contact> {
    list.iter()
        .filter(|c| !c.contacted && contact_is_due(c, now))
        .collect()
}

/// Where a contact stands relative to its reminder interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverdueStatus {
    NeverContacted,
    /// Due, by this much past the interval (zero when exactly due).
    Overdue(Duration),
    /// Not due yet; becomes due after this much more time.
    DueIn(Duration),
}

impl OverdueStatus {
    pub fn is_due(&self) -> bool {
        !matches!(self, OverdueStatus::DueIn(_))
    }

    fn sort_key(&self) -> i64 {
        match self {
            OverdueStatus::NeverContacted => i64::MIN,
            OverdueStatus::Overdue(d) => -d.num_milliseconds(),
            OverdueStatus::DueIn(d) => d.num_milliseconds(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReminderStatus<'a> {
    pub contact: &'a Contact,
    pub since_last_contact: Option<Duration>,
    pub overdue_status: OverdueStatus,
}

pub fn reminder_status(contact: &Contact, now: DateTime<Utc>) -> ReminderStatus<'_> {
    let since_last_contact = contact.last_contacted_at.map(|at| now - at);

    let overdue_status = match since_last_contact {
        None => OverdueStatus::NeverContacted,
        Some(elapsed) => {
            let remaining = interval_millis(contact.period, contact.period_unit)
                - elapsed.num_milliseconds() as f64;
            if remaining <= 0.0 {
                OverdueStatus::Overdue(Duration::milliseconds((-remaining).round() as i64))
            } else {
                OverdueStatus::DueIn(Duration::milliseconds(remaining.round() as i64))
            }
        }
    };

    ReminderStatus {
        contact,
        since_last_contact,
        overdue_status,
    }
}

/// Status of every active contact: never-contacted first, then most overdue,
/// then soonest due.
pub fn all_reminders(list: &[Contact], now: DateTime<Utc>) -> Vec<ReminderStatus<'_>> {
    let mut results: Vec<ReminderStatus<'_>> = list
        .iter()
        .filter(|c| !c.contacted)
        .map(|c| reminder_status(c, now))
        .collect();

    results.sort_by_key(|s| s.overdue_status.sort_key());
    results
}
