use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::builder::session::BuilderSession;

pub type SharedSession = Arc<Mutex<BuilderSession>>;

/// Live builder sessions keyed by id. Each session has its own lock.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: BuilderSession) -> (Uuid, SharedSession) {
        let id = session.id();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, shared.clone());
        tracing::info!("Builder session {id} created");
        (id, shared)
    }

    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Drops the session and cancels its in-flight exports.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id);
        match removed {
            Some(session) => {
                session.lock().await.cancel_token().cancel();
                tracing::info!("Builder session {id} closed");
                true
            }
            None => false,
        }
    }

    /// Removes sessions untouched for longer than `ttl`. Sessions currently
    /// locked are in use and skipped.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, session| match session.try_lock() {
            Ok(guard) if guard.last_touched().elapsed() > ttl => {
                guard.cancel_token().cancel();
                tracing::debug!("Evicting idle builder session {id}");
                false
            }
            _ => true,
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!("Evicted {evicted} idle builder sessions");
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
