use indexmap::IndexMap;
use serde::Serialize;

/// Values for a loaded template's additional fields, keyed by placeholder
/// name in template order.
///
/// `reset` is the only way keys come and go. It always starts from blank
/// values, so reloading a template discards whatever was typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DynamicFieldStore {
    values: IndexMap<String, String>,
}

impl DynamicFieldStore {
    pub fn reset<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = names
            .into_iter()
            .map(|name| (name.into(), String::new()))
            .collect();
    }

    /// Updates an existing entry. Unknown names are ignored; returns whether
    /// the value was stored.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
