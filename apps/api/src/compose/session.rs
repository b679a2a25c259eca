//! Compose session state.
//!
//! The whole form is one value. Every UI event goes through `apply`, which
//! returns the next state. Template loads are numbered: a response is applied
//! only if it belongs to the most recently issued load, so a slow response can
//! not overwrite the fields of a newer template.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::compose::fields::{BaseField, BaseFields, GenerationMode};
use crate::compose::request::{build_request, GenerationRequest};
use crate::compose::store::DynamicFieldStore;
use crate::models::ids::RemoteId;
use crate::models::template::TemplateRecord;
use crate::templates::placeholders::extract_placeholders;
use crate::templates::reconcile::{additional_fields, BaseFieldSet};

#[derive(Debug, Clone)]
pub enum ComposeEvent {
    FieldEdited { field: BaseField, value: String },
    ModeSelected(GenerationMode),
    AdditionalEdited { name: String, value: String },
    /// A template load was sent; it gets the next generation number.
    TemplateLoadIssued,
    TemplateLoaded {
        generation: u64,
        template_id: RemoteId,
        template: TemplateRecord,
    },
    TemplateLoadFailed { generation: u64, message: String },
    SubmitFailed { message: String },
    Submitted { article_id: RemoteId },
}

#[derive(Debug, Clone, Serialize)]
pub struct ComposeSession {
    pub fields: BaseFields,
    pub mode: GenerationMode,
    /// Template whose placeholders are currently loaded.
    pub template_id: Option<RemoteId>,
    /// Every placeholder of the loaded template, base fields included.
    pub placeholders: Vec<String>,
    pub additional: DynamicFieldStore,
    /// Number of the latest issued template load.
    pub load_generation: u64,
    pub loading: bool,
    pub error: Option<String>,
    pub last_article_id: Option<RemoteId>,
    pub created_at: DateTime<Utc>,
}

impl ComposeSession {
    pub fn new() -> Self {
        Self {
            fields: BaseFields::default(),
            mode: GenerationMode::default(),
            template_id: None,
            placeholders: Vec::new(),
            additional: DynamicFieldStore::default(),
            load_generation: 0,
            loading: false,
            error: None,
            last_article_id: None,
            created_at: Utc::now(),
        }
    }

    /// Returns the next state, or `None` if `event` is a stale template load
    /// response and must be discarded.
    pub fn apply(&self, event: ComposeEvent) -> Option<Self> {
        let mut next = self.clone();
        match event {
            ComposeEvent::FieldEdited { field, value } => next.fields.set(field, value),
            ComposeEvent::ModeSelected(mode) => next.mode = mode,
            ComposeEvent::AdditionalEdited { name, value } => {
                next.additional.set(&name, value);
            }
            ComposeEvent::TemplateLoadIssued => {
                next.load_generation += 1;
                next.loading = true;
                next.error = None;
            }
            ComposeEvent::TemplateLoaded {
                generation,
                template_id,
                template,
            } => {
                if generation != self.load_generation {
                    return None;
                }
                let placeholders = extract_placeholders(&template.templates.to_text());
                next.additional
                    .reset(additional_fields(&placeholders, &BaseFieldSet::default()));
                next.placeholders = placeholders;
                next.template_id = Some(template_id);
                next.loading = false;
            }
            ComposeEvent::TemplateLoadFailed {
                generation,
                message,
            } => {
                if generation != self.load_generation {
                    return None;
                }
                next.loading = false;
                next.error = Some(message);
            }
            ComposeEvent::SubmitFailed { message } => next.error = Some(message),
            ComposeEvent::Submitted { article_id } => {
                next.error = None;
                next.last_article_id = Some(article_id);
            }
        }
        Some(next)
    }

    pub fn request(&self) -> GenerationRequest {
        build_request(
            &self.fields,
            &self.additional,
            self.mode,
            self.template_id.as_ref(),
        )
    }
}

impl Default for ComposeSession {
    fn default() -> Self {
        Self::new()
    }
}
