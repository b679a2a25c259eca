//! News service client: the single point of entry for all calls to the
//! external generation/storage service.
//!
//! No other module talks to the service directly. Handlers depend on the
//! `NewsService` trait so tests can swap in an in-memory implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::compose::request::GenerationRequest;
use crate::models::article::{Article, ArticleUpdate};
use crate::models::ids::RemoteId;
use crate::models::template::TemplateRecord;

pub mod messages;

#[cfg(test)]
pub mod fake;

const MAX_GET_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum NewsServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        /// Human-readable message extracted from the error body, if any.
        message: Option<String>,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl NewsServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, NewsServiceError::Api { status: 404, .. })
    }

    /// The service's own explanation, when it sent one.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            NewsServiceError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[async_trait]
pub trait NewsService: Send + Sync {
    async fn create_article(&self, request: &GenerationRequest)
        -> Result<Article, NewsServiceError>;
    async fn list_articles(&self) -> Result<Vec<Article>, NewsServiceError>;
    async fn get_article(&self, id: &RemoteId) -> Result<Article, NewsServiceError>;
    async fn update_article(
        &self,
        id: &RemoteId,
        update: &ArticleUpdate,
    ) -> Result<Article, NewsServiceError>;
    async fn delete_article(&self, id: &RemoteId) -> Result<(), NewsServiceError>;

    async fn list_templates(&self) -> Result<Vec<TemplateRecord>, NewsServiceError>;
    async fn get_template(&self, id: &RemoteId) -> Result<TemplateRecord, NewsServiceError>;
    async fn create_template(
        &self,
        record: &TemplateRecord,
    ) -> Result<TemplateRecord, NewsServiceError>;
    async fn update_template(
        &self,
        id: &RemoteId,
        record: &TemplateRecord,
    ) -> Result<TemplateRecord, NewsServiceError>;
    async fn delete_template(&self, id: &RemoteId) -> Result<(), NewsServiceError>;
}

/// HTTP implementation of `NewsService`.
///
/// GETs are retried on 429, 5xx and transport errors with exponential
/// backoff. Writes are sent once: a failed submission is re-triggered by the
/// user, never by this client.
#[derive(Clone)]
pub struct NewsClient {
    client: Client,
    base_url: String,
}

impl NewsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, NewsServiceError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, NewsServiceError> {
        let url = self.url(path);
        let mut last_error: Option<NewsServiceError> = None;

        for attempt in 0..MAX_GET_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 500ms, 1s
                let delay = Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "GET {} attempt {} failed, retrying after {}ms...",
                    url,
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.get(&url).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(NewsServiceError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("News service returned {} for GET {}: {}", status, url, body);
                last_error = Some(api_error(status, &body));
                continue;
            }

            return parse_response(response).await;
        }

        Err(last_error.unwrap_or(NewsServiceError::Api {
            status: StatusCode::SERVICE_UNAVAILABLE.as_u16(),
            message: None,
        }))
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, NewsServiceError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("{} {}", method, url);
        let response = self
            .client
            .request(method, &url)
            .json(body)
            .send()
            .await?;
        parse_response(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), NewsServiceError> {
        let url = self.url(path);
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }
        Ok(())
    }
}

async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, NewsServiceError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(api_error(status, &body));
    }
    Ok(serde_json::from_str(&body)?)
}

fn api_error(status: StatusCode, body: &str) -> NewsServiceError {
    NewsServiceError::Api {
        status: status.as_u16(),
        message: extract_error_message(body),
    }
}

/// Pulls a displayable message out of an error body.
///
/// Order: the first per-field validation message (`date` before any other
/// field), then `detail`, then `message`.
fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    if let Some(errors) = value.get("errors").and_then(Value::as_object) {
        let date_first = errors.get("date").into_iter().chain(
            errors
                .iter()
                .filter(|(field, _)| field.as_str() != "date")
                .map(|(_, v)| v),
        );
        if let Some(message) = date_first.filter_map(first_message).next() {
            return Some(message);
        }
    }

    ["detail", "message"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_message),
        _ => None,
    }
}

#[async_trait]
impl NewsService for NewsClient {
    async fn create_article(
        &self,
        request: &GenerationRequest,
    ) -> Result<Article, NewsServiceError> {
        self.send_json(Method::POST, "create/", request).await
    }

    async fn list_articles(&self) -> Result<Vec<Article>, NewsServiceError> {
        self.get_json("news/").await
    }

    async fn get_article(&self, id: &RemoteId) -> Result<Article, NewsServiceError> {
        self.get_json(&format!("news/{id}/")).await
    }

    async fn update_article(
        &self,
        id: &RemoteId,
        update: &ArticleUpdate,
    ) -> Result<Article, NewsServiceError> {
        self.send_json(Method::PUT, &format!("news/{id}/"), update)
            .await
    }

    async fn delete_article(&self, id: &RemoteId) -> Result<(), NewsServiceError> {
        self.delete(&format!("news/{id}/")).await
    }

    async fn list_templates(&self) -> Result<Vec<TemplateRecord>, NewsServiceError> {
        self.get_json("manage-templates/").await
    }

    async fn get_template(&self, id: &RemoteId) -> Result<TemplateRecord, NewsServiceError> {
        self.get_json(&format!("manage-templates/{id}/")).await
    }

    async fn create_template(
        &self,
        record: &TemplateRecord,
    ) -> Result<TemplateRecord, NewsServiceError> {
        self.send_json(Method::POST, "manage-templates/", record)
            .await
    }

    async fn update_template(
        &self,
        id: &RemoteId,
        record: &TemplateRecord,
    ) -> Result<TemplateRecord, NewsServiceError> {
        self.send_json(Method::PUT, &format!("manage-templates/{id}/"), record)
            .await
    }

    async fn delete_template(&self, id: &RemoteId) -> Result<(), NewsServiceError> {
        self.delete(&format!("manage-templates/{id}/")).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::extract::State;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    use super::*;
    use crate::compose::fields::{BaseFields, GenerationMode};
    use crate::compose::request::build_request;
    use crate::compose::store::DynamicFieldStore;

    type Hits = Arc<AtomicUsize>;
    type Reply = (axum::http::StatusCode, Json<Value>);

    /// Serves `router` on an ephemeral port and returns the client base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{addr}/llm")
    }

    fn unavailable() -> Reply {
        (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"detail": "busy"})),
        )
    }

    async fn busy_once(State(hits): State<Hits>) -> Reply {
        if hits.fetch_add(1, Ordering::SeqCst) == 0 {
            unavailable()
        } else {
            (axum::http::StatusCode::OK, Json(json!([])))
        }
    }

    async fn always_busy(State(hits): State<Hits>) -> Reply {
        hits.fetch_add(1, Ordering::SeqCst);
        unavailable()
    }

    fn empty_request() -> GenerationRequest {
        build_request(
            &BaseFields::default(),
            &DynamicFieldStore::default(),
            GenerationMode::default(),
            None,
        )
    }

    #[tokio::test]
    async fn test_get_retries_after_server_error() {
        let hits = Hits::default();
        let router = Router::new()
            .route("/llm/news/", get(busy_once))
            .with_state(hits.clone());
        let client = NewsClient::new(&serve(router).await, Duration::from_secs(5)).unwrap();

        let articles = client.list_articles().await.unwrap();
        assert!(articles.is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_get_gives_up_after_three_attempts() {
        let hits = Hits::default();
        let router = Router::new()
            .route("/llm/manage-templates/", get(always_busy))
            .with_state(hits.clone());
        let client = NewsClient::new(&serve(router).await, Duration::from_secs(5)).unwrap();

        let err = client.list_templates().await.unwrap_err();
        assert!(matches!(err, NewsServiceError::Api { status: 503, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_submission_is_sent_once() {
        let hits = Hits::default();
        let router = Router::new()
            .route("/llm/create/", post(always_busy))
            .with_state(hits.clone());
        let client = NewsClient::new(&serve(router).await, Duration::from_secs(5)).unwrap();

        let err = client.create_article(&empty_request()).await.unwrap_err();
        assert!(matches!(err, NewsServiceError::Api { status: 503, .. }));
        assert_eq!(err.remote_message(), Some("busy"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_extract_prefers_date_field_error() {
        let body = r#"{"errors": {"place": ["place is bad"], "date": ["invalid date"]}, "detail": "nope"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("invalid date"));
    }

    #[test]
    fn test_extract_falls_back_to_other_field_errors() {
        let body = r#"{"errors": {"place": ["place is bad"]}}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("place is bad"));
    }

    #[test]
    fn test_extract_detail() {
        let body = r#"{"detail": "Template not found."}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Template not found.")
        );
    }

    #[test]
    fn test_extract_none_for_unstructured_body() {
        assert_eq!(extract_error_message("<html>502</html>"), None);
        assert_eq!(extract_error_message(r#"{"errors": {"date": []}}"#), None);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = NewsClient::new("http://127.0.0.1:8000/llm/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("news/3/"), "http://127.0.0.1:8000/llm/news/3/");
    }

    #[test]
    fn test_remote_message_only_for_api_errors() {
        let err = NewsServiceError::Api {
            status: 400,
            message: Some("bad".into()),
        };
        assert_eq!(err.remote_message(), Some("bad"));
        assert!(!err.is_not_found());

        let not_found = NewsServiceError::Api {
            status: 404,
            message: None,
        };
        assert!(not_found.is_not_found());
    }
}
