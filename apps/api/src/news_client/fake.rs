//! In-memory `NewsService` for handler tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::compose::request::GenerationRequest;
use crate::models::article::{Article, ArticleUpdate};
use crate::models::ids::RemoteId;
use crate::models::template::TemplateRecord;
use crate::news_client::{NewsService, NewsServiceError};

#[derive(Default)]
struct Inner {
    next_id: u64,
    articles: Vec<Article>,
    templates: Vec<TemplateRecord>,
    submissions: Vec<GenerationRequest>,
    create_error: Option<(u16, Option<String>)>,
    failing_templates: Vec<RemoteId>,
    held_templates: HashMap<RemoteId, Arc<Notify>>,
    held_create: Option<Arc<Notify>>,
}

#[derive(Default)]
pub struct FakeNewsService {
    inner: Mutex<Inner>,
}

fn not_found() -> NewsServiceError {
    NewsServiceError::Api {
        status: 404,
        message: Some("Not found.".to_string()),
    }
}

impl FakeNewsService {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(inner: &mut Inner) -> RemoteId {
        inner.next_id += 1;
        RemoteId::new(inner.next_id.to_string())
    }

    pub fn add_template(&self, mut record: TemplateRecord) -> RemoteId {
        let mut inner = self.inner.lock().unwrap();
        let id = Self::next_id(&mut inner);
        record.id = Some(id.clone());
        inner.templates.push(record);
        id
    }

    pub fn add_article(&self, news_type: &str, details: &str) -> RemoteId {
        let mut inner = self.inner.lock().unwrap();
        let id = Self::next_id(&mut inner);
        inner.articles.push(Article {
            id: id.clone(),
            news_type: news_type.to_string(),
            date: None,
            details: details.to_string(),
        });
        id
    }

    pub fn fail_create(&self, status: u16, message: Option<&str>) {
        self.inner.lock().unwrap().create_error = Some((status, message.map(str::to_string)));
    }

    pub fn fail_template(&self, id: &RemoteId) {
        self.inner.lock().unwrap().failing_templates.push(id.clone());
    }

    /// Makes `get_template(id)` wait until the returned `Notify` fires.
    pub fn hold_template(&self, id: &RemoteId) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.inner
            .lock()
            .unwrap()
            .held_templates
            .insert(id.clone(), notify.clone());
        notify
    }

    /// Makes `create_article` wait, after recording the submission, until
    /// the returned `Notify` fires.
    pub fn hold_create(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.inner.lock().unwrap().held_create = Some(notify.clone());
        notify
    }

    pub fn submissions(&self) -> Vec<GenerationRequest> {
        self.inner.lock().unwrap().submissions.clone()
    }

    pub fn templates(&self) -> Vec<TemplateRecord> {
        self.inner.lock().unwrap().templates.clone()
    }
}

#[async_trait]
impl NewsService for FakeNewsService {
    async fn create_article(
        &self,
        request: &GenerationRequest,
    ) -> Result<Article, NewsServiceError> {
        let held = {
            let mut inner = self.inner.lock().unwrap();
            inner.submissions.push(request.clone());
            inner.held_create.clone()
        };
        if let Some(notify) = held {
            notify.notified().await;
        }

        let mut inner = self.inner.lock().unwrap();
        if let Some((status, message)) = inner.create_error.clone() {
            return Err(NewsServiceError::Api { status, message });
        }
        let id = Self::next_id(&mut inner);
        let article = Article {
            id,
            news_type: request.fields.news_type.clone(),
            date: Some(request.fields.date.clone()),
            details: format!("<p>{} - {}</p>", request.fields.event, request.fields.place),
        };
        inner.articles.push(article.clone());
        Ok(article)
    }

    async fn list_articles(&self) -> Result<Vec<Article>, NewsServiceError> {
        Ok(self.inner.lock().unwrap().articles.clone())
    }

    async fn get_article(&self, id: &RemoteId) -> Result<Article, NewsServiceError> {
        let inner = self.inner.lock().unwrap();
        inner
            .articles
            .iter()
            .find(|a| &a.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn update_article(
        &self,
        id: &RemoteId,
        update: &ArticleUpdate,
    ) -> Result<Article, NewsServiceError> {
        let mut inner = self.inner.lock().unwrap();
        let article = inner
            .articles
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(not_found)?;
        article.details = update.details.clone();
        Ok(article.clone())
    }

    async fn delete_article(&self, id: &RemoteId) -> Result<(), NewsServiceError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.articles.len();
        inner.articles.retain(|a| &a.id != id);
        if inner.articles.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn list_templates(&self) -> Result<Vec<TemplateRecord>, NewsServiceError> {
        Ok(self.templates())
    }

    async fn get_template(&self, id: &RemoteId) -> Result<TemplateRecord, NewsServiceError> {
        let held = self.inner.lock().unwrap().held_templates.get(id).cloned();
        if let Some(notify) = held {
            notify.notified().await;
        }

        let inner = self.inner.lock().unwrap();
        if inner.failing_templates.contains(id) {
            return Err(NewsServiceError::Api {
                status: 503,
                message: None,
            });
        }
        inner
            .templates
            .iter()
            .find(|t| t.id.as_ref() == Some(id))
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_template(
        &self,
        record: &TemplateRecord,
    ) -> Result<TemplateRecord, NewsServiceError> {
        let id = self.add_template(record.clone());
        Ok(TemplateRecord {
            id: Some(id),
            ..record.clone()
        })
    }

    async fn update_template(
        &self,
        id: &RemoteId,
        record: &TemplateRecord,
    ) -> Result<TemplateRecord, NewsServiceError> {
        let mut inner = self.inner.lock().unwrap();
        let existing = inner
            .templates
            .iter_mut()
            .find(|t| t.id.as_ref() == Some(id))
            .ok_or_else(not_found)?;
        *existing = TemplateRecord {
            id: Some(id.clone()),
            ..record.clone()
        };
        Ok(existing.clone())
    }

    async fn delete_template(&self, id: &RemoteId) -> Result<(), NewsServiceError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.templates.len();
        inner.templates.retain(|t| t.id.as_ref() != Some(id));
        if inner.templates.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}
