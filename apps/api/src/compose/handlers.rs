//! Axum route handlers for compose sessions.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::compose::fields::{BaseField, GenerationMode};
use crate::compose::request::GenerationRequest;
use crate::compose::session::{ComposeEvent, ComposeSession};
use crate::errors::AppError;
use crate::models::article::Article;
use crate::models::ids::RemoteId;
use crate::models::news_type::NewsType;
use crate::news_client::messages::{TEMPLATE_LOAD_FAILED, TEMPLATE_NOT_FOUND};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ComposeSessionResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub session: ComposeSession,
}

/// Partial update of the base inputs. Absent keys are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct FieldsPatch {
    pub news_type: Option<String>,
    pub place: Option<String>,
    pub source: Option<String>,
    pub event: Option<String>,
    pub date: Option<String>,
    pub participants: Option<String>,
    pub event_details: Option<String>,
    pub creation_type: Option<GenerationMode>,
}

impl FieldsPatch {
    fn into_events(self) -> Vec<ComposeEvent> {
        let edits = [
            (BaseField::NewsType, self.news_type),
            (BaseField::Place, self.place),
            (BaseField::Source, self.source),
            (BaseField::Event, self.event),
            (BaseField::Date, self.date),
            (BaseField::Participants, self.participants),
            (BaseField::EventDetails, self.event_details),
        ];
        edits
            .into_iter()
            .filter_map(|(field, value)| value.map(|value| ComposeEvent::FieldEdited { field, value }))
            .chain(self.creation_type.map(ComposeEvent::ModeSelected))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct AdditionalValue {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct LoadTemplateRequest {
    pub template_id: RemoteId,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub session_id: Uuid,
    pub article: Article,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Compose session {id} not found"))
}

/// Applies `event` to the stored session. `Ok(None)` means the event was a
/// stale template load response and nothing changed.
async fn apply_event(
    state: &AppState,
    id: Uuid,
    event: ComposeEvent,
) -> Result<Option<ComposeSession>, AppError> {
    state
        .compose_sessions
        .update(id, |session| {
            let next = session.apply(event)?;
            *session = next.clone();
            Some(next)
        })
        .await
        .ok_or_else(|| session_not_found(id))
}

fn respond(session_id: Uuid, session: ComposeSession) -> Json<ComposeSessionResponse> {
    Json(ComposeSessionResponse {
        session_id,
        session,
    })
}

fn superseded(generation: u64) -> AppError {
    AppError::Conflict(format!(
        "Template load #{generation} was superseded by a newer load"
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/compose
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<ComposeSessionResponse>) {
    let session = ComposeSession::new();
    let session_id = state.compose_sessions.insert(session.clone()).await;
    info!(
        "Compose session {session_id} created ({} active)",
        state.compose_sessions.len().await
    );
    (StatusCode::CREATED, respond(session_id, session))
}

/// GET /api/v1/compose/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ComposeSessionResponse>, AppError> {
    let session = state
        .compose_sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(respond(id, session))
}

/// DELETE /api/v1/compose/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .compose_sessions
        .remove(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    info!("Compose session {id} discarded");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/compose/:id/fields
///
/// The category must be one of the offered news types; other fields are
/// free text.
pub async fn handle_patch_fields(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<FieldsPatch>,
) -> Result<Json<ComposeSessionResponse>, AppError> {
    if let Some(news_type) = patch.news_type.as_deref() {
        if !news_type.is_empty() && NewsType::from_label(news_type).is_none() {
            return Err(AppError::Validation(format!(
                "Unknown news_type '{news_type}'"
            )));
        }
    }

    let events = patch.into_events();
    let session = state
        .compose_sessions
        .update(id, |session| {
            for event in events {
                if let Some(next) = session.apply(event) {
                    *session = next;
                }
            }
            session.clone()
        })
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(respond(id, session))
}

/// PUT /api/v1/compose/:id/additional/:name
///
/// Names that are not additional fields of the loaded template are ignored.
pub async fn handle_set_additional(
    State(state): State<AppState>,
    Path((id, name)): Path<(Uuid, String)>,
    Json(body): Json<AdditionalValue>,
) -> Result<Json<ComposeSessionResponse>, AppError> {
    let known = state
        .compose_sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))?
        .additional
        .get(&name)
        .is_some();
    if !known {
        debug!("Ignoring value for unknown additional field '{name}' in session {id}");
    }

    let session = apply_event(
        &state,
        id,
        ComposeEvent::AdditionalEdited {
            name,
            value: body.value,
        },
    )
    .await?
    .ok_or_else(|| session_not_found(id))?;
    Ok(respond(id, session))
}

/// POST /api/v1/compose/:id/template
///
/// Loads a template for reuse and rebuilds the additional fields from its
/// placeholders. If another load is issued for the same session before this
/// one returns, this response is discarded with 409.
pub async fn handle_load_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<LoadTemplateRequest>,
) -> Result<Json<ComposeSessionResponse>, AppError> {
    let issued = apply_event(&state, id, ComposeEvent::TemplateLoadIssued)
        .await?
        .ok_or_else(|| session_not_found(id))?;
    let generation = issued.load_generation;
    info!(
        "Loading template {} into compose session {id} (load #{generation})",
        request.template_id
    );

    match state.news.get_template(&request.template_id).await {
        Ok(template) => {
            let event = ComposeEvent::TemplateLoaded {
                generation,
                template_id: request.template_id.clone(),
                template,
            };
            let session = apply_event(&state, id, event).await?.ok_or_else(|| {
                debug!("Discarding stale template load #{generation} for session {id}");
                superseded(generation)
            })?;
            if session.additional.is_empty() {
                info!(
                    "Template {} applied to session {id}: no additional fields",
                    request.template_id
                );
            } else {
                info!(
                    "Template {} applied to session {id}: additional fields {:?}",
                    request.template_id,
                    session.additional.names().collect::<Vec<_>>()
                );
            }
            Ok(respond(id, session))
        }
        Err(err) => {
            warn!(
                "Template {} failed to load for session {id}: {err}",
                request.template_id
            );
            let (message, failure) = if err.is_not_found() {
                let message = TEMPLATE_NOT_FOUND.to_string();
                (message.clone(), AppError::NotFound(message))
            } else {
                let message = TEMPLATE_LOAD_FAILED.to_string();
                (message.clone(), AppError::TemplateLoad(message))
            };
            let event = ComposeEvent::TemplateLoadFailed {
                generation,
                message,
            };
            match apply_event(&state, id, event).await? {
                Some(_) => Err(failure),
                None => Err(superseded(generation)),
            }
        }
    }
}

/// GET /api/v1/compose/:id/request
///
/// Returns the payload a submission would send right now.
pub async fn handle_preview_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GenerationRequest>, AppError> {
    let session = state
        .compose_sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(session.request()))
}

/// POST /api/v1/compose/:id/submit
///
/// Required base fields must be filled. Additional fields may be blank; the
/// service decides whether that is acceptable.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmitResponse>, AppError> {
    let session = state
        .compose_sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))?;

    let missing = session.fields.missing_required();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let request = session.request();
    info!(
        "Submitting compose session {id}: mode={:?}, template={:?}, {} additional variable(s)",
        request.creation_type,
        request.template_id,
        request.additional_variables.len()
    );

    match state.news.create_article(&request).await {
        Ok(article) => {
            info!("Article {} created from session {id}", article.id);
            let recorded = apply_event(
                &state,
                id,
                ComposeEvent::Submitted {
                    article_id: article.id.clone(),
                },
            )
            .await;
            match recorded {
                Ok(_) => {}
                Err(AppError::NotFound(_)) => {
                    warn!(
                        "Compose session {id} was discarded before article {} came back",
                        article.id
                    );
                }
                Err(err) => return Err(err),
            }
            Ok(Json(SubmitResponse {
                session_id: id,
                article,
            }))
        }
        Err(err) => {
            let err = AppError::submission(err);
            if let AppError::Submission(message) = &err {
                apply_event(
                    &state,
                    id,
                    ComposeEvent::SubmitFailed {
                        message: message.clone(),
                    },
                )
                .await?;
            }
            Err(err)
        }
    }
}
