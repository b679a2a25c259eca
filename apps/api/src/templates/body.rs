//! Template body representations.
//!
//! The news service stores a template body either as one string or as a list
//! of segments. Segments are joined for extraction and split back on commas
//! when persisted, so a literal comma inside a segment does not survive a
//! round trip through the text form.

use serde::{Deserialize, Serialize};

/// Separator used when rendering segments as one text.
pub const SEGMENT_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateBody {
    Plain(String),
    Segmented(Vec<String>),
}

/// Which representation a body is persisted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyRepr {
    Plain,
    #[default]
    Segmented,
}

impl TemplateBody {
    pub fn repr(&self) -> BodyRepr {
        match self {
            TemplateBody::Plain(_) => BodyRepr::Plain,
            TemplateBody::Segmented(_) => BodyRepr::Segmented,
        }
    }

    /// Single-string form used for placeholder extraction and editing.
    pub fn to_text(&self) -> String {
        match self {
            TemplateBody::Plain(text) => text.clone(),
            TemplateBody::Segmented(segments) => segments.join(SEGMENT_SEPARATOR),
        }
    }

    /// Builds a body for persistence in the given representation.
    ///
    /// Segmented: split on `,`, dropping the single space the join adds.
    /// This deliberately differs from a plain per-comma split, which would
    /// keep that space (`" second"`) and grow the text by one space per
    /// segment on every edit and save.
    pub fn from_text(text: &str, repr: BodyRepr) -> Self {
        match repr {
            BodyRepr::Plain => TemplateBody::Plain(text.to_string()),
            BodyRepr::Segmented => TemplateBody::Segmented(
                text.split(',')
                    .enumerate()
                    .map(|(i, segment)| {
                        if i == 0 {
                            segment
                        } else {
                            segment.strip_prefix(' ').unwrap_or(segment)
                        }
                    })
                    .map(str::to_string)
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_either_shape() {
        let plain: TemplateBody = serde_json::from_str(r#""in {place}""#).unwrap();
        assert_eq!(plain, TemplateBody::Plain("in {place}".to_string()));

        let segmented: TemplateBody = serde_json::from_str(r#"["a {x}", "b"]"#).unwrap();
        assert_eq!(segmented.repr(), BodyRepr::Segmented);
        assert_eq!(segmented.to_text(), "a {x}, b");
    }

    #[test]
    fn test_segmented_round_trip_without_commas() {
        let body = TemplateBody::Segmented(vec!["first {a}".into(), "second {b}".into()]);
        let again = TemplateBody::from_text(&body.to_text(), BodyRepr::Segmented);
        assert_eq!(again, body);
    }

    #[test]
    fn test_embedded_comma_splits_segment() {
        let body = TemplateBody::Segmented(vec!["one, two".into()]);
        let again = TemplateBody::from_text(&body.to_text(), BodyRepr::Segmented);
        assert_eq!(
            again,
            TemplateBody::Segmented(vec!["one".into(), "two".into()])
        );
    }

    #[test]
    fn test_plain_is_kept_verbatim() {
        let text = "a, b,c";
        assert_eq!(
            TemplateBody::from_text(text, BodyRepr::Plain),
            TemplateBody::Plain(text.to_string())
        );
    }

    #[test]
    fn test_empty_text_segmented() {
        assert_eq!(
            TemplateBody::from_text("", BodyRepr::Segmented),
            TemplateBody::Segmented(vec![String::new()])
        );
    }
}
