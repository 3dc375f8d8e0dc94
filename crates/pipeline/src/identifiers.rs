//! Newtype domain identifiers.
//!
//! [`PipelineRunId`] correlates every span and event emitted for one request.
//! [`CookwareName`] names a piece of cookware; its identity is
//! case-insensitive, so `"Frying Pan"` and `"frying pan"` are the same item.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single pipeline run (one `/chat` request).
///
/// Generated fresh for every request and recorded on the run's tracing span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PipelineRunId(Uuid);

impl PipelineRunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for PipelineRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed, case-insensitive
// ---------------------------------------------------------------------------

/// The display name of a piece of cookware (e.g. `"Frying Pan"`).
///
/// Equality and hashing ignore case. The original spelling is kept for
/// display and serialisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookwareName(String);

impl CookwareName {
    /// Creates a new name, returning `None` if the value is empty or blank.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.trim().is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    /// Returns the name as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the lower-cased comparison key.
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl PartialEq for CookwareName {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for CookwareName {}

impl Hash for CookwareName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl std::fmt::Display for CookwareName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn cookware_name_rejects_blank_values() {
        assert!(CookwareName::new("").is_none());
        assert!(CookwareName::new("   ").is_none());
        assert!(CookwareName::new("Whisk").is_some());
    }

    #[test]
    fn cookware_name_identity_ignores_case() {
        let a = CookwareName::new("Frying Pan").unwrap();
        let b = CookwareName::new("frying pan").unwrap();
        assert_eq!(a, b);

        let set: HashSet<_> = [a.clone(), b].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_eq!(a.as_str(), "Frying Pan");
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(PipelineRunId::new_random(), PipelineRunId::new_random());
    }
}
