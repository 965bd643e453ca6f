use serde::{Deserialize, Serialize};

use super::Cents;

/// A named recurring monthly cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub name: String,
    pub cost_cents: Cents,
}

impl Subscription {
    pub fn new(name: impl Into<String>, cost_cents: Cents) -> Self {
        Self {
            name: name.into(),
            cost_cents,
        }
    }

    /// Key used for uniqueness checks. Names are compared case-insensitively
    /// via Unicode lowercase.
    pub fn name_key(&self) -> String {
        normalize_name(&self.name)
    }

    /// Returns true if `name` refers to this subscription, ignoring case.
    pub fn matches(&self, name: &str) -> bool {
        self.name_key() == normalize_name(name)
    }
}

/// Uniqueness key for a name: trimmed and lowercased.
///
/// This is Unicode lowercasing, not full case folding, so "Straße" and
/// "STRASSE" stay distinct names.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
