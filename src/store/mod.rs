pub mod contact_store;
pub mod group_store;

pub use contact_store::ContactStore;
pub use group_store::GroupLabelStore;
