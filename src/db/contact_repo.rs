use crate::db::kv_store::{self, KeyValueStore};
use crate::error::TouchResult;
use crate::model::Contact;

/// Storage key holding the JSON array of contacts.
pub const PEOPLE_KEY: &str = "people";

/// Read the stored contact list. An absent key is an empty list.
pub fn load(kv: &dyn KeyValueStore) -> TouchResult<Vec<Contact>> {
    Ok(kv_store::load_json::<Vec<Contact>>(kv, PEOPLE_KEY)?.unwrap_or_default())
}

/// Replace the stored contact list with `contacts`.
pub fn save(kv: &dyn KeyValueStore, contacts: &[Contact]) -> TouchResult<()> {
    kv_store::save_json(kv, PEOPLE_KEY, contacts)
}
