use std::collections::HashMap;
use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

use crate::nutrition::controller::SearchState;

/// One user's search session. Its state lives and dies with it.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub created_at: OffsetDateTime,
    pub state: Mutex<SearchState>,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Arc<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Arc<Session> {
        let session = Arc::new(Session {
            id: Uuid::new_v4(),
            created_at: OffsetDateTime::now_utc(),
            state: Mutex::new(SearchState::new()),
        });
        self.inner.write().await.insert(session.id, session.clone());
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Session>> {
        self.inner.read().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Drops sessions created before `now - max_age`. Returns how many went.
    pub async fn purge_older_than(&self, max_age: time::Duration, now: OffsetDateTime) -> usize {
        let cutoff = now - max_age;
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.created_at >= cutoff);
        before - sessions.len()
    }

    /// Periodically purges sessions older than `ttl` until the runtime stops.
    pub fn spawn_sweeper(&self, ttl: std::time::Duration) -> JoinHandle<()> {
        let store = self.clone();
        let max_age = time::Duration::seconds(ttl.as_secs() as i64);
        let every = (ttl / 4).max(std::time::Duration::from_secs(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let purged = store.purge_older_than(max_age, OffsetDateTime::now_utc()).await;
                if purged > 0 {
                    let remaining = store.len().await;
                    info!(purged, remaining, "expired sessions purged");
                }
            }
        })
    }
}
