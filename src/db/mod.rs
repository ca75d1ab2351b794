pub mod schema;
pub mod kv_store;
pub mod contact_repo;
pub mod group_repo;

pub use kv_store::{KeyValueStore, MemoryKv, SqliteKv};
