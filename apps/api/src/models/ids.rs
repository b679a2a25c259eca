use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier assigned by the news service.
///
/// The service encodes ids as JSON numbers today, but nothing here depends on
/// that: both numbers and strings are accepted and carried as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RemoteId(String);

impl RemoteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RemoteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
    Unsigned(u64),
}

impl<'de> Deserialize<'de> for RemoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => RemoteId(s),
            RawId::Integer(n) => RemoteId(n.to_string()),
            RawId::Unsigned(n) => RemoteId(n.to_string()),
        })
    }
}
