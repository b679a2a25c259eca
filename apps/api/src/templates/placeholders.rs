//! Placeholder extraction.
//!
//! A placeholder is `{`, a name, then `}`. Names start with a letter or an
//! underscore and continue with word characters. There is no escaping and no
//! nesting: anything that does not match exactly (`{}`, `{a-b}`, a lone brace)
//! is plain text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([_\p{L}]\w*)\}").expect("Invalid placeholder regex")
});

/// Returns the unique placeholder names in `body`, in order of first occurrence.
pub fn extract_placeholders(body: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    PLACEHOLDER_REGEX
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Formats a name as a braced token, e.g. `place` -> `{place}`.
pub fn braced(name: &str) -> String {
    format!("{{{name}}}")
}
