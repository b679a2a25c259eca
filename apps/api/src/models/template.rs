use serde::{Deserialize, Serialize};

use crate::models::ids::RemoteId;
use crate::models::news_type::NewsType;
use crate::templates::body::TemplateBody;

/// Template read/write payload of the news service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RemoteId>,
    pub news_type: NewsType,
    pub templates: TemplateBody,
}
