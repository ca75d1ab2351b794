use std::path::Path;

use serde_json::Value;

use crate::db::{contact_repo, group_repo, KeyValueStore};
use crate::error::TouchResult;
use crate::model::group::{default_groups, normalize};
use crate::model::{reassign_duplicate_ids, Contact};

/// Imports a key-value dump exported from the mobile app into `kv`,
/// replacing whatever contacts and group labels it held.
pub fn import_json(json_path: &Path, kv: &dyn KeyValueStore) -> TouchResult<ImportStats> {
    let json_str = std::fs::read_to_string(json_path)?;
    let json: Value = serde_json::from_str(&json_str)?;

    import_dump(kv, &json)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub contacts: usize,
    pub groups: usize,
    /// Contacts whose id was blank or repeated and had to be replaced.
    pub reassigned_ids: usize,
}

/// The dump is an object keyed like the app's storage. Values may be JSON
/// arrays or, as the app stored them, strings holding encoded JSON.
pub fn import_dump(kv: &dyn KeyValueStore, json: &Value) -> TouchResult<ImportStats> {
    let mut contacts: Vec<Contact> = match member(json, &["people"])? {
        Some(v) => serde_json::from_value(v)?,
        None => Vec::new(),
    };

    let reassigned_ids = reassign_duplicate_ids(&mut contacts);

    let groups: Vec<String> = match member(json, &["groupOptions", "countryOptions"])? {
        Some(v) => normalize(serde_json::from_value(v)?),
        None => default_groups(),
    };

    contact_repo::save(kv, &contacts)?;
    group_repo::save(kv, &groups)?;

    Ok(ImportStats {
        contacts: contacts.len(),
        groups: groups.len(),
        reassigned_ids,
    })
}

/// First present, non-null member among `keys`, decoding string-wrapped JSON.
fn member(json: &Value, keys: &[&str]) -> TouchResult<Option<Value>> {
    for key in keys {
        match json.get(*key) {
            None | Some(Value::Null) => continue,
            Some(Value::String(encoded)) => return Ok(Some(serde_json::from_str(encoded)?)),
            Some(v) => return Ok(Some(v.clone())),
        }
    }
    Ok(None)
}
