//! Template authoring: the working copy of one template plus cursor-aware
//! insertion of catalog variables.
//!
//! Cursor positions count Unicode scalar values, never bytes. A position that
//! falls inside a grapheme cluster (a letter followed by harakat, say) moves
//! forward to the end of that cluster before the text is cut.

use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::models::ids::RemoteId;
use crate::models::news_type::NewsType;
use crate::models::template::TemplateRecord;
use crate::templates::body::{BodyRepr, TemplateBody};
use crate::templates::catalog::VariableCatalog;

/// Result of inserting a token into a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insertion {
    pub text: String,
    pub cursor: usize,
}

/// Replaces the `[selection_start, selection_end)` character range of `text`
/// with `token`. Out-of-range positions are clamped to the text; an end
/// before the start collapses the selection to the start. Both ends snap
/// forward to the next grapheme boundary.
pub fn insert_at_cursor(
    text: &str,
    selection_start: i64,
    selection_end: i64,
    token: &str,
) -> Insertion {
    let len = text.chars().count();
    let start = snap_to_grapheme(text, clamp_position(selection_start, len));
    let end = snap_to_grapheme(text, clamp_position(selection_end, len)).max(start);

    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end);

    let mut result = String::with_capacity(text.len() - (end_byte - start_byte) + token.len());
    result.push_str(&text[..start_byte]);
    result.push_str(token);
    result.push_str(&text[end_byte..]);

    Insertion {
        text: result,
        cursor: start + token.chars().count(),
    }
}

fn clamp_position(pos: i64, len: usize) -> usize {
    if pos <= 0 {
        0
    } else {
        usize::try_from(pos).map_or(len, |p| p.min(len))
    }
}

/// First grapheme boundary at or after `char_pos`, in scalar values.
fn snap_to_grapheme(text: &str, char_pos: usize) -> usize {
    let mut boundary = 0;
    for grapheme in text.graphemes(true) {
        if boundary >= char_pos {
            break;
        }
        boundary += grapheme.chars().count();
    }
    boundary
}

fn byte_offset(text: &str, char_pos: usize) -> usize {
    text.char_indices()
        .nth(char_pos)
        .map_or(text.len(), |(byte, _)| byte)
}

/// In-progress edit of one template.
#[derive(Debug, Clone, Serialize)]
pub struct AuthoringSession {
    /// Set when editing a template that already exists remotely.
    pub template_id: Option<RemoteId>,
    pub news_type: Option<NewsType>,
    pub body: String,
    pub repr: BodyRepr,
    pub cursor: usize,
    pub catalog: VariableCatalog,
}

impl AuthoringSession {
    /// A blank template, persisted in segmented form like the service's own
    /// templates.
    pub fn new() -> Self {
        Self {
            template_id: None,
            news_type: None,
            body: String::new(),
            repr: BodyRepr::default(),
            cursor: 0,
            catalog: VariableCatalog::default(),
        }
    }

    /// Working copy of an existing template. The cursor starts at the end.
    pub fn from_record(record: &TemplateRecord) -> Self {
        let body = record.templates.to_text();
        Self {
            template_id: record.id.clone(),
            news_type: Some(record.news_type),
            cursor: body.chars().count(),
            body,
            repr: record.templates.repr(),
            catalog: VariableCatalog::default(),
        }
    }

    /// Replaces the body; the cursor is kept if still inside the text.
    pub fn set_body(&mut self, body: String) {
        self.cursor = self.cursor.min(body.chars().count());
        self.body = body;
    }

    pub fn insert(&mut self, selection_start: i64, selection_end: i64, token: &str) {
        let Insertion { text, cursor } =
            insert_at_cursor(&self.body, selection_start, selection_end, token);
        self.body = text;
        self.cursor = cursor;
    }

    /// Builds the record to persist, or `None` while no category is chosen.
    pub fn to_record(&self) -> Option<TemplateRecord> {
        Some(TemplateRecord {
            id: self.template_id.clone(),
            news_type: self.news_type?,
            templates: TemplateBody::from_text(&self.body, self.repr),
        })
    }
}

impl Default for AuthoringSession {
    fn default() -> Self {
        Self::new()
    }
}
