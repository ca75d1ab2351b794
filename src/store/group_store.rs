use std::sync::Arc;

use tracing::{debug, warn};

use crate::db::{group_repo, KeyValueStore};
use crate::error::{TouchError, TouchResult};
use crate::model::group::{self, default_groups};
use crate::validation;

/// Owns the ordered set of group labels. Removing a label leaves contacts
/// that use it alone. Like `ContactStore`, writes are refused until a load
/// has succeeded.
pub struct GroupLabelStore {
    kv: Arc<dyn KeyValueStore>,
    labels: Vec<String>,
    loaded: bool,
}

impl GroupLabelStore {
    pub fn open(kv: Arc<dyn KeyValueStore>) -> Self {
        let mut store = Self {
            kv,
            labels: default_groups(),
            loaded: false,
        };
        store.load();
        store
    }

    /// Re-read labels from storage, falling back to the defaults when nothing
    /// was ever saved and to the current labels when the read fails.
    pub fn load(&mut self) -> &[String] {
        match group_repo::load(self.kv.as_ref()) {
            Ok(stored) => {
                self.labels = stored.map(group::normalize).unwrap_or_else(default_groups);
                self.loaded = true;
            }
            Err(e) => warn!(error = %e, "could not load group labels, keeping current set"),
        }
        &self.labels
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn contains(&self, label: &str) -> bool {
        let trimmed = label.trim();
        self.labels.iter().any(|l| l == trimmed)
    }

    /// Returns false if the label was already known.
    pub fn add(&mut self, label: &str) -> TouchResult<bool> {
        let label = validation::non_blank(label, "group")?;
        if self.contains(&label) {
            return Ok(false);
        }
        self.ensure_loaded()?;

        self.labels.push(label);
        self.save()?;
        Ok(true)
    }

    /// Returns false if no such label existed.
    pub fn remove(&mut self, label: &str) -> TouchResult<bool> {
        let trimmed = label.trim();
        let index = match self.labels.iter().position(|l| l == trimmed) {
            Some(i) => i,
            None => return Ok(false),
        };
        self.ensure_loaded()?;

        self.labels.remove(index);
        self.save()?;
        Ok(true)
    }

    pub fn save(&self) -> TouchResult<()> {
        self.ensure_loaded()?;
        match group_repo::save(self.kv.as_ref(), &self.labels) {
            Ok(()) => {
                debug!(count = self.labels.len(), "saved group labels");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to save group labels");
                Err(e)
            }
        }
    }

    pub(crate) fn ensure_loaded(&self) -> TouchResult<()> {
        if self.loaded {
            return Ok(());
        }
        warn!("group labels were never loaded, refusing to write");
        Err(TouchError::StorageRead {
            key: group_repo::GROUP_OPTIONS_KEY.to_string(),
            reason: "group labels were not loaded; refusing to overwrite stored data".to_string(),
        })
    }
}
