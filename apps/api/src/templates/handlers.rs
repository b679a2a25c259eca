//! Axum route handlers for stored templates and authoring sessions.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::ids::RemoteId;
use crate::models::news_type::NewsType;
use crate::models::template::TemplateRecord;
use crate::news_client::messages::{
    TEMPLATES_FETCH_FAILED, TEMPLATE_CREATE_FAILED, TEMPLATE_DELETE_FAILED,
    TEMPLATE_LOAD_FAILED, TEMPLATE_UPDATE_FAILED,
};
use crate::state::AppState;
use crate::templates::authoring::AuthoringSession;
use crate::templates::placeholders::extract_placeholders;
use crate::templates::reconcile::{additional_fields, BaseFieldSet};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TemplateFieldsResponse {
    pub template_id: RemoteId,
    pub placeholders: Vec<String>,
    pub additional_fields: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthoringSessionResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub session: AuthoringSession,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateAuthoringRequest {
    /// Edit an existing template instead of starting a blank one.
    pub template_id: Option<RemoteId>,
}

#[derive(Debug, Deserialize)]
pub struct AuthoringPatch {
    pub news_type: Option<NewsType>,
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InsertRequest {
    pub selection_start: i64,
    pub selection_end: i64,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct AddVariableRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct AddVariableResponse {
    pub added: bool,
    pub variables: Vec<String>,
}

fn authoring_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Authoring session {id} not found"))
}

async fn update_authoring<R>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut AuthoringSession) -> R,
) -> Result<R, AppError> {
    state
        .authoring_sessions
        .update(id, f)
        .await
        .ok_or_else(|| authoring_not_found(id))
}

// ────────────────────────────────────────────────────────────────────────────
// Stored templates
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemplateRecord>>, AppError> {
    let templates = state
        .news
        .list_templates()
        .await
        .map_err(|e| AppError::remote(e, TEMPLATES_FETCH_FAILED))?;
    Ok(Json(templates))
}

/// GET /api/v1/templates/:id
pub async fn handle_get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TemplateRecord>, AppError> {
    let template = state
        .news
        .get_template(&RemoteId::new(id))
        .await
        .map_err(|e| AppError::remote(e, TEMPLATE_LOAD_FAILED))?;
    Ok(Json(template))
}

/// DELETE /api/v1/templates/:id
pub async fn handle_delete_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = RemoteId::new(id);
    state
        .news
        .delete_template(&id)
        .await
        .map_err(|e| AppError::remote(e, TEMPLATE_DELETE_FAILED))?;
    info!("Template {id} deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/templates/:id/fields
///
/// Placeholders of a stored template and which of them need extra input.
pub async fn handle_template_fields(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TemplateFieldsResponse>, AppError> {
    let template_id = RemoteId::new(id);
    let template = state
        .news
        .get_template(&template_id)
        .await
        .map_err(|e| AppError::remote(e, TEMPLATE_LOAD_FAILED))?;

    let placeholders = extract_placeholders(&template.templates.to_text());
    let additional_fields = additional_fields(&placeholders, &BaseFieldSet::default());
    Ok(Json(TemplateFieldsResponse {
        template_id,
        placeholders,
        additional_fields,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Authoring sessions
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/authoring
pub async fn handle_create_authoring(
    State(state): State<AppState>,
    Json(request): Json<CreateAuthoringRequest>,
) -> Result<(StatusCode, Json<AuthoringSessionResponse>), AppError> {
    let session = match &request.template_id {
        Some(template_id) => {
            let record = state
                .news
                .get_template(template_id)
                .await
                .map_err(|e| AppError::remote(e, TEMPLATE_LOAD_FAILED))?;
            let mut session = AuthoringSession::from_record(&record);
            if session.template_id.is_none() {
                session.template_id = Some(template_id.clone());
            }
            session
        }
        None => AuthoringSession::new(),
    };

    let session_id = state.authoring_sessions.insert(session.clone()).await;
    info!(
        "Authoring session {session_id} started (template: {:?})",
        session.template_id
    );
    Ok((
        StatusCode::CREATED,
        Json(AuthoringSessionResponse {
            session_id,
            session,
        }),
    ))
}

/// GET /api/v1/authoring/:id
pub async fn handle_get_authoring(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AuthoringSessionResponse>, AppError> {
    let session = state
        .authoring_sessions
        .get(id)
        .await
        .ok_or_else(|| authoring_not_found(id))?;
    Ok(Json(AuthoringSessionResponse {
        session_id: id,
        session,
    }))
}

/// DELETE /api/v1/authoring/:id
///
/// Ends the session; its variable catalog goes with it.
pub async fn handle_delete_authoring(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .authoring_sessions
        .remove(id)
        .await
        .ok_or_else(|| authoring_not_found(id))?;
    info!("Authoring session {id} discarded");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/authoring/:id
pub async fn handle_patch_authoring(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<AuthoringPatch>,
) -> Result<Json<AuthoringSessionResponse>, AppError> {
    let session = update_authoring(&state, id, |session| {
        if let Some(news_type) = patch.news_type {
            session.news_type = Some(news_type);
        }
        if let Some(body) = patch.body {
            session.set_body(body);
        }
        session.clone()
    })
    .await?;
    Ok(Json(AuthoringSessionResponse {
        session_id: id,
        session,
    }))
}

/// POST /api/v1/authoring/:id/insert
pub async fn handle_insert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<InsertRequest>,
) -> Result<Json<AuthoringSessionResponse>, AppError> {
    let session = update_authoring(&state, id, |session| {
        session.insert(
            request.selection_start,
            request.selection_end,
            &request.token,
        );
        session.clone()
    })
    .await?;
    Ok(Json(AuthoringSessionResponse {
        session_id: id,
        session,
    }))
}

/// POST /api/v1/authoring/:id/variables
pub async fn handle_add_variable(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddVariableRequest>,
) -> Result<Json<AddVariableResponse>, AppError> {
    let response = update_authoring(&state, id, |session| AddVariableResponse {
        added: session.catalog.add(&request.name),
        variables: session.catalog.entries().to_vec(),
    })
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/authoring/:id/save
///
/// Creates the template remotely, or updates it when the session edits an
/// existing one. After a create the session tracks the new id, so saving
/// again updates instead of duplicating.
pub async fn handle_save_authoring(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TemplateRecord>, AppError> {
    let session = state
        .authoring_sessions
        .get(id)
        .await
        .ok_or_else(|| authoring_not_found(id))?;

    let record = session
        .to_record()
        .ok_or_else(|| AppError::Validation("news_type is required".to_string()))?;

    let saved = match &session.template_id {
        Some(template_id) => state
            .news
            .update_template(template_id, &record)
            .await
            .map_err(|e| AppError::remote(e, TEMPLATE_UPDATE_FAILED))?,
        None => state
            .news
            .create_template(&record)
            .await
            .map_err(|e| AppError::remote(e, TEMPLATE_CREATE_FAILED))?,
    };
    info!("Template {:?} saved from authoring session {id}", saved.id);

    if let Some(saved_id) = saved.id.clone() {
        update_authoring(&state, id, |session| session.template_id = Some(saved_id)).await?;
    }
    Ok(Json(saved))
}
