pub mod ids;
pub mod period;
pub mod contact;
pub mod group;

// Re-exports for convenience
pub use ids::Id;
pub use period::PeriodUnit;
pub use contact::{reassign_duplicate_ids, Contact, ContactPatch, NewContact};
pub use group::{default_groups, DEFAULT_GROUPS};
