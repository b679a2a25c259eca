use serde::{Deserialize, Serialize};

use crate::models::ids::RemoteId;

/// A generated article as returned by the news service.
///
/// `news_type` is kept as the raw label: older articles carry categories that
/// are no longer offered for new submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: RemoteId,
    pub news_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Finished article body (rich text).
    #[serde(default)]
    pub details: String,
}

/// Body of an article edit. Only the article text is editable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleUpdate {
    pub details: String,
}
