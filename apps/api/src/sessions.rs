use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

struct Entry<T> {
    session: T,
    touched: Instant,
}

/// In-memory session registry keyed by a random id.
///
/// Sessions are never persisted; a restart drops them all. Callers must not
/// hold the lock across a remote call: read or update, release, then await.
/// Every `get` or `update` refreshes the entry's idle clock.
pub struct SessionMap<T> {
    inner: Arc<RwLock<HashMap<Uuid, Entry<T>>>>,
}

impl<T> Clone for SessionMap<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SessionMap<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T: Clone> SessionMap<T> {
    pub async fn insert(&self, session: T) -> Uuid {
        let id = Uuid::new_v4();
        let entry = Entry {
            session,
            touched: Instant::now(),
        };
        self.inner.write().await.insert(id, entry);
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<T> {
        self.update(id, |session| session.clone()).await
    }

    /// Runs `f` on the session under the write lock.
    pub async fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut sessions = self.inner.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.touched = Instant::now();
        Some(f(&mut entry.session))
    }

    pub async fn remove(&self, id: Uuid) -> Option<T> {
        self.inner.write().await.remove(&id).map(|entry| entry.session)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Drops every session idle for at least `idle`. Returns how many went.
    pub async fn sweep(&self, idle: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.touched) < idle);
        before - sessions.len()
    }
}

impl<T: Clone + Send + Sync + 'static> SessionMap<T> {
    /// Sweeps the map every `period` in a background task.
    pub fn spawn_sweeper(
        &self,
        kind: &'static str,
        idle: Duration,
        period: Duration,
    ) -> tokio::task::JoinHandle<()> {
        let sessions = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let dropped = sessions.sweep(idle).await;
                if dropped > 0 {
                    tracing::info!("Dropped {} idle {} sessions", dropped, kind);
                }
            }
        })
    }
}
