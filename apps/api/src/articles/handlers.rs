//! Axum route handlers for generated articles.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::article::{Article, ArticleUpdate};
use crate::models::ids::RemoteId;
use crate::news_client::messages::{
    ARTICLES_LOAD_FAILED, ARTICLE_DELETE_FAILED, ARTICLE_LOAD_FAILED, ARTICLE_SAVE_FAILED,
};
use crate::state::AppState;

/// GET /api/v1/news
pub async fn handle_list_articles(
    State(state): State<AppState>,
) -> Result<Json<Vec<Article>>, AppError> {
    let articles = state
        .news
        .list_articles()
        .await
        .map_err(|e| AppError::remote(e, ARTICLES_LOAD_FAILED))?;
    Ok(Json(articles))
}

/// GET /api/v1/news/:id
pub async fn handle_get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Article>, AppError> {
    let article = state
        .news
        .get_article(&RemoteId::new(id))
        .await
        .map_err(|e| AppError::remote(e, ARTICLE_LOAD_FAILED))?;
    Ok(Json(article))
}

/// PUT /api/v1/news/:id
///
/// Replaces the article body with the edited text.
pub async fn handle_update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<ArticleUpdate>,
) -> Result<Json<Article>, AppError> {
    let id = RemoteId::new(id);
    let article = state
        .news
        .update_article(&id, &update)
        .await
        .map_err(|e| AppError::remote(e, ARTICLE_SAVE_FAILED))?;
    info!("Article {id} edited ({} chars)", article.details.chars().count());
    Ok(Json(article))
}

/// DELETE /api/v1/news/:id
pub async fn handle_delete_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = RemoteId::new(id);
    state
        .news
        .delete_article(&id)
        .await
        .map_err(|e| AppError::remote(e, ARTICLE_DELETE_FAILED))?;
    info!("Article {id} deleted");
    Ok(StatusCode::NO_CONTENT)
}
