use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use uuid::Uuid;

use crate::error::{TouchError, TouchResult};

/// Opaque, type-tagged identifier. New ids are UUID v4 strings, but any
/// non-empty string loaded from storage is accepted as-is so records written
/// by older clients keep their identity.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    value: String,
    #[serde(skip)]
    _phantom: PhantomData<T>,
}

impl<T> Id<T> {
    fn new(value: String) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    pub fn generate() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier string.
    pub fn parse(s: &str) -> TouchResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TouchError::BlankField { field: "id".into() });
        }
        Ok(Self::new(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Foo;

    #[test]
    fn generate_creates_unique_ids() {
        let id1 = Id::<Foo>::generate();
        let id2 = Id::<Foo>::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn generated_ids_are_uuids() {
        let id = Id::<Foo>::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn parse_accepts_legacy_short_ids() {
        let id = Id::<Foo>::parse("k3j9x0a1b").unwrap();
        assert_eq!(id.as_str(), "k3j9x0a1b");
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(Id::<Foo>::parse("  ").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = Id::<Foo>::parse("abc123").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
        let back: Id<Foo> = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(back, id);
    }
}
