use crate::db::kv_store::{self, KeyValueStore};
use crate::error::TouchResult;

/// Storage key holding the JSON array of group labels.
pub const GROUP_OPTIONS_KEY: &str = "groupOptions";

/// Read the stored labels. `None` means nothing has been saved yet.
pub fn load(kv: &dyn KeyValueStore) -> TouchResult<Option<Vec<String>>> {
    kv_store::load_json(kv, GROUP_OPTIONS_KEY)
}

pub fn save(kv: &dyn KeyValueStore, labels: &[String]) -> TouchResult<()> {
    kv_store::save_json(kv, GROUP_OPTIONS_KEY, labels)
}
