use chrono::Utc;
use tracing::{info, warn};

use crate::error::{TouchError, TouchResult};
use crate::model::{Contact, ContactPatch, Id, NewContact, PeriodUnit};
use crate::store::{ContactStore, GroupLabelStore};
use crate::validation;

/// Add a contact, registering its group as a new label when it isn't known
/// yet. Invalid input leaves both stores untouched.
///
/// A failed label write does not drop the contact: it is still inserted and
/// a `StorageWrite` is returned afterwards. Both changes stay in
/// memory, so a later `save` on each store persists them.
pub fn add_contact(
    contacts: &mut ContactStore,
    groups: &mut GroupLabelStore,
    input: &NewContact,
) -> TouchResult<Contact> {
    let contact = Contact::create(input)?;
    contacts.ensure_loaded()?;

    let mut pending = None;
    if !groups.contains(&contact.group) {
        match groups.add(&contact.group) {
            Ok(_) => info!(group = %contact.group, "created group label"),
            Err(e @ TouchError::StorageWrite { .. }) => pending = Some(e),
            Err(e @ TouchError::StorageRead { .. }) => {
                warn!(error = %e, group = %contact.group, "group label not registered")
            }
            Err(e) => return Err(e),
        }
    }

    let contact = contacts.insert(contact)?;
    match pending {
        Some(e) => Err(e),
        None => Ok(contact),
    }
}

/// Apply a period/unit edit typed as text. Blank fields are left unchanged.
pub fn edit_period(
    contacts: &mut ContactStore,
    id: &Id<Contact>,
    period: Option<&str>,
    period_unit: Option<&str>,
) -> TouchResult<Contact> {
    let patch = ContactPatch {
        period: validation::trim_optional(period)
            .map(|p| validation::period(&p))
            .transpose()?,
        period_unit: validation::trim_optional(period_unit)
            .map(|u| u.parse::<PeriodUnit>())
            .transpose()?,
    };

    contacts.update(id, patch)
}

pub fn mark_contacted_now(contacts: &mut ContactStore, id: &Id<Contact>) -> TouchResult<Contact> {
    contacts.mark_contacted(id, Utc::now())
}
