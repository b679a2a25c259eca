pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::articles::handlers as articles;
use crate::compose::handlers as compose;
use crate::state::AppState;
use crate::templates::handlers as templates;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Compose sessions
        .route("/api/v1/compose", post(compose::handle_create_session))
        .route(
            "/api/v1/compose/:id",
            get(compose::handle_get_session).delete(compose::handle_delete_session),
        )
        .route(
            "/api/v1/compose/:id/fields",
            patch(compose::handle_patch_fields),
        )
        .route(
            "/api/v1/compose/:id/additional/:name",
            put(compose::handle_set_additional),
        )
        .route(
            "/api/v1/compose/:id/template",
            post(compose::handle_load_template),
        )
        .route(
            "/api/v1/compose/:id/request",
            get(compose::handle_preview_request),
        )
        .route("/api/v1/compose/:id/submit", post(compose::handle_submit))
        // Stored templates
        .route("/api/v1/templates", get(templates::handle_list_templates))
        .route(
            "/api/v1/templates/:id",
            get(templates::handle_get_template).delete(templates::handle_delete_template),
        )
        .route(
            "/api/v1/templates/:id/fields",
            get(templates::handle_template_fields),
        )
        // Template authoring
        .route("/api/v1/authoring", post(templates::handle_create_authoring))
        .route(
            "/api/v1/authoring/:id",
            get(templates::handle_get_authoring)
                .patch(templates::handle_patch_authoring)
                .delete(templates::handle_delete_authoring),
        )
        .route(
            "/api/v1/authoring/:id/insert",
            post(templates::handle_insert),
        )
        .route(
            "/api/v1/authoring/:id/variables",
            post(templates::handle_add_variable),
        )
        .route(
            "/api/v1/authoring/:id/save",
            post(templates::handle_save_authoring),
        )
        // Generated articles
        .route("/api/v1/news", get(articles::handle_list_articles))
        .route(
            "/api/v1/news/:id",
            get(articles::handle_get_article)
                .put(articles::handle_update_article)
                .delete(articles::handle_delete_article),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::test_support::{send, test_app};

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app();
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "newsdesk-api");
    }
}
