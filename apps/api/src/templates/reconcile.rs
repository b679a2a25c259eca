//! Base vs. additional field reconciliation.

/// Canonical base fields, in form order. These always have dedicated inputs
/// and are never treated as additional.
pub const BASE_FIELDS: &[&str] = &[
    "news_type",
    "place",
    "source",
    "event",
    "date",
    "participants",
    "event_details",
];

/// An ordered, non-empty set of base field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseFieldSet {
    names: Vec<String>,
}

impl BaseFieldSet {
    /// Builds a set from `names`, dropping duplicates. Returns `None` if no
    /// names remain.
    #[cfg(test)]
    pub fn new<I, S>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        (!unique.is_empty()).then_some(Self { names: unique })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for BaseFieldSet {
    fn default() -> Self {
        Self {
            names: BASE_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Placeholders that need an extra user-supplied value: everything not in
/// `base`, order preserved.
pub fn additional_fields(placeholders: &[String], base: &BaseFieldSet) -> Vec<String> {
    placeholders
        .iter()
        .filter(|name| !base.contains(name))
        .cloned()
        .collect()
}
