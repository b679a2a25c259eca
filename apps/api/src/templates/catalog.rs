//! Quick-insert variable suggestions for template authoring.

use serde::Serialize;

use crate::templates::placeholders::braced;
use crate::templates::reconcile::BaseFieldSet;

/// Known braced tokens, unique, in insertion order. Entries are never removed;
/// the catalog lives as long as one authoring session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VariableCatalog {
    entries: Vec<String>,
}

impl VariableCatalog {
    /// A catalog holding one `{name}` token per base field.
    pub fn seed(base: &BaseFieldSet) -> Self {
        Self {
            entries: base.names().iter().map(|name| braced(name)).collect(),
        }
    }

    /// Adds `{raw_name.trim()}` unless the trimmed name is empty or the token
    /// is already present. Returns whether an entry was added.
    pub fn add(&mut self, raw_name: &str) -> bool {
        let name = raw_name.trim();
        if name.is_empty() {
            return false;
        }
        let token = braced(name);
        if self.contains(&token) {
            return false;
        }
        self.entries.push(token);
        true
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.iter().any(|t| t == token)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Default for VariableCatalog {
    fn default() -> Self {
        Self::seed(&BaseFieldSet::default())
    }
}
