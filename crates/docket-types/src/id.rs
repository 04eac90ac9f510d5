use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of identifiers produced by [`DocId::generate`].
pub const GENERATED_ID_LEN: usize = 12;

/// Opaque identifier for a document.
///
/// A `DocId` is an arbitrary caller-chosen string key. The empty string is
/// the reserved "unassigned" sentinel: it is never a valid stored key, and
/// stores reject it on write. Use [`DocId::generate`] for a fresh random
/// identifier.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    /// Create an identifier from an arbitrary string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The "unassigned" sentinel.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Generate a fresh random identifier of [`GENERATED_ID_LEN`]
    /// alphanumeric characters.
    pub fn generate() -> Self {
        let id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(GENERATED_ID_LEN)
            .map(char::from)
            .collect();
        Self(id)
    }

    /// Returns `true` if this is the "unassigned" sentinel.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocId({})", self.0)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DocId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DocId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn empty_is_sentinel() {
        assert!(DocId::empty().is_empty());
        assert!(DocId::new("").is_empty());
        assert!(DocId::default().is_empty());
        assert!(!DocId::new("a").is_empty());
    }

    #[test]
    fn generate_has_fixed_length() {
        let id = DocId::generate();
        assert_eq!(id.as_str().len(), GENERATED_ID_LEN);
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generated_ids_are_unique() {
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let id = DocId::generate();
            assert!(seen.insert(id.clone()), "duplicate generated id: {id}");
        }
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(DocId::new("a") < DocId::new("b"));
        assert!(DocId::new("a") < DocId::new("ab"));
        assert!(DocId::empty() < DocId::new("a"));
    }

    #[test]
    fn serde_is_transparent() {
        let id = DocId::new("doc-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"doc-42\"");
        let parsed: DocId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    proptest! {
        #[test]
        fn new_preserves_contents(s in ".*") {
            let id = DocId::new(s.clone());
            prop_assert_eq!(id.as_str(), s.as_str());
            prop_assert_eq!(id.is_empty(), s.is_empty());
        }
    }
}
