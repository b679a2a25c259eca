use std::sync::Arc;
use std::time::Duration;

use crate::compose::session::ComposeSession;
use crate::config::Config;
use crate::news_client::NewsService;
use crate::sessions::SessionMap;
use crate::templates::authoring::AuthoringSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// External generation/storage service. Default: `NewsClient` over HTTP.
    pub news: Arc<dyn NewsService>,
    pub compose_sessions: SessionMap<ComposeSession>,
    pub authoring_sessions: SessionMap<AuthoringSession>,
    pub config: Config,
}

impl AppState {
    pub fn new(news: Arc<dyn NewsService>, config: Config) -> Self {
        Self {
            news,
            compose_sessions: SessionMap::default(),
            authoring_sessions: SessionMap::default(),
            config,
        }
    }

    /// Starts the background tasks that expire idle sessions.
    pub fn spawn_session_sweepers(&self) {
        let idle = self.config.session_idle;
        let period = (idle / 10).max(Duration::from_secs(1));
        self.compose_sessions.spawn_sweeper("compose", idle, period);
        self.authoring_sessions.spawn_sweeper("authoring", idle, period);
    }
}
