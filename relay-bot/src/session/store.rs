//! In-memory session store.
//!
//! The map itself sits behind an `RwLock` that is held only for lookups and structural changes.
//! Each session has its own `Mutex`; a handler holds it for the whole update, which serializes
//! updates of one user while different users proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument};

use super::Session;

/// Shared, lockable reference to one session.
pub type SessionHandle = Arc<Mutex<Session>>;

type SessionMap = HashMap<i64, SessionHandle>;

/// Owns every [`Session`], keyed by user id. Cloning shares the same map.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<SessionMap>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the user's session, creating a fresh one if absent.
    pub async fn get_or_create(&self, user_id: i64) -> SessionHandle {
        if let Some(handle) = self.sessions.read().await.get(&user_id) {
            return handle.clone();
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(user_id)
            .or_insert_with(|| {
                info!(user_id, "Session created");
                Arc::new(Mutex::new(Session::new(user_id, Utc::now())))
            })
            .clone()
    }

    /// Marks activity now; creates the session if absent.
    pub async fn touch(&self, user_id: i64) {
        let handle = self.get_or_create(user_id).await;
        handle.lock().await.touch(Utc::now());
    }

    /// Clears the user's history. Returns false when the user has no session.
    pub async fn reset(&self, user_id: i64) -> bool {
        let handle = self.sessions.read().await.get(&user_id).cloned();
        match handle {
            Some(handle) => {
                handle.lock().await.reset();
                true
            }
            None => false,
        }
    }

    /// Removes sessions inactive for longer than `ttl`. Sessions locked by an in-flight update are kept.
    #[instrument(skip(self))]
    pub async fn sweep(&self, now: DateTime<Utc>, ttl: Duration) {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|user_id, handle| match handle.try_lock() {
            Ok(session) => {
                let expired = session.is_expired(now, ttl);
                if expired {
                    debug!(user_id = *user_id, "Session expired");
                }
                !expired
            }
            Err(_) => true,
        });
        let removed = before - sessions.len();
        info!(removed, remaining = sessions.len(), "step: session sweep done");
    }

    /// Copy of the user's session, if any.
    pub async fn snapshot(&self, user_id: i64) -> Option<Session> {
        let handle = self.sessions.read().await.get(&user_id).cloned()?;
        let session = handle.lock().await;
        Some(session.clone())
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Runs [`SessionStore::sweep`] every `every` until the returned task is aborted.
    pub fn spawn_sweeper(&self, every: std::time::Duration, ttl: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick fires immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                store.sweep(Utc::now(), ttl).await;
            }
        })
    }
}
