use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::db::{contact_repo, KeyValueStore};
use crate::error::{TouchError, TouchResult};
use crate::model::{reassign_duplicate_ids, Contact, ContactPatch, Id, NewContact};
use crate::validation;

/// Owns the contact list. Every mutation writes the whole list back to
/// storage before returning; a failed write is logged and returned, and the
/// in-memory change is kept so the next successful write carries it.
///
/// Until one load has succeeded the stored list is unknown, so every
/// mutation is refused with `StorageRead` rather than overwriting it.
pub struct ContactStore {
    kv: Arc<dyn KeyValueStore>,
    contacts: Vec<Contact>,
    loaded: bool,
}

impl ContactStore {
    pub fn open(kv: Arc<dyn KeyValueStore>) -> Self {
        let mut store = Self {
            kv,
            contacts: Vec::new(),
            loaded: false,
        };
        store.load();
        store
    }

    /// Re-read the list from storage. On a read failure the current list is
    /// left untouched. Blank and repeated ids are replaced on the way in.
    pub fn load(&mut self) -> &[Contact] {
        match contact_repo::load(self.kv.as_ref()) {
            Ok(mut contacts) => {
                let reassigned = reassign_duplicate_ids(&mut contacts);
                debug!(count = contacts.len(), reassigned, "loaded contacts");
                self.contacts = contacts;
                self.loaded = true;
            }
            Err(e) => warn!(error = %e, "could not load contacts, keeping current list"),
        }
        &self.contacts
    }

    /// Whether a load has succeeded, so mutations are allowed.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, id: &Id<Contact>) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.id == id)
    }

    /// Case-insensitive substring match on name.
    pub fn find_by_name(&self, query: &str) -> Vec<&Contact> {
        let lower = query.trim().to_lowercase();
        self.contacts
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&lower))
            .collect()
    }

    /// Validate form input and append a new contact. Invalid input is
    /// rejected without touching the list or storage.
    ///
    /// The group is taken as given and not registered as a label. Front ends
    /// should go through `ops::contact_ops::add_contact`, which creates an
    /// unknown group first.
    pub fn add(&mut self, input: &NewContact) -> TouchResult<Contact> {
        let contact = Contact::create(input)?;
        self.insert(contact)
    }

    /// Append an already-built contact. Ids must stay unique.
    ///
    /// On `StorageWrite` the contact has still been appended in memory; call
    /// `save` to retry rather than inserting it again.
    pub fn insert(&mut self, contact: Contact) -> TouchResult<Contact> {
        self.ensure_loaded()?;
        if self.get(&contact.id).is_some() {
            return Err(TouchError::AlreadyExists {
                entity_type: "Contact".into(),
                identifier: contact.id.to_string(),
            });
        }

        self.contacts.push(contact.clone());
        self.save()?;
        Ok(contact)
    }

    pub fn update(&mut self, id: &Id<Contact>, patch: ContactPatch) -> TouchResult<Contact> {
        self.ensure_loaded()?;
        let period = patch
            .period
            .map(|p| validation::positive(p, "period"))
            .transpose()?;

        let updated = {
            let contact = self.find_mut(id)?;
            if let Some(p) = period {
                contact.period = p;
            }
            if let Some(unit) = patch.period_unit {
                contact.period_unit = unit;
            }
            contact.clone()
        };

        self.save()?;
        Ok(updated)
    }

    pub fn mark_contacted(&mut self, id: &Id<Contact>, now: DateTime<Utc>) -> TouchResult<Contact> {
        self.ensure_loaded()?;
        let updated = {
            let contact = self.find_mut(id)?;
            contact.last_contacted_at = Some(now);
            contact.clone()
        };

        self.save()?;
        Ok(updated)
    }

    pub fn delete(&mut self, id: &Id<Contact>) -> TouchResult<Contact> {
        self.ensure_loaded()?;
        let index = self
            .contacts
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| not_found(id))?;

        let removed = self.contacts.remove(index);
        self.save()?;
        Ok(removed)
    }

    /// Write the full list to storage.
    pub fn save(&self) -> TouchResult<()> {
        self.ensure_loaded()?;
        match contact_repo::save(self.kv.as_ref(), &self.contacts) {
            Ok(()) => {
                debug!(count = self.contacts.len(), "saved contacts");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to save contacts");
                Err(e)
            }
        }
    }

    pub(crate) fn ensure_loaded(&self) -> TouchResult<()> {
        if self.loaded {
            return Ok(());
        }
        warn!("contacts were never loaded, refusing to write");
        Err(TouchError::StorageRead {
            key: contact_repo::PEOPLE_KEY.to_string(),
            reason: "contacts were not loaded; refusing to overwrite stored data".to_string(),
        })
    }

    fn find_mut(&mut self, id: &Id<Contact>) -> TouchResult<&mut Contact> {
        self.contacts
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: &Id<Contact>) -> TouchError {
    TouchError::NotFound {
        entity_type: "Contact".into(),
        id: id.to_string(),
    }
}
