// src/web/sessions.rs
//! In-memory registry of live conversations, one `Session` per id.
//!
//! Sessions are evicted on every `create`: ended conversations once they have
//! been untouched for `ended_grace` (long enough to save or read the summary),
//! any other conversation once idle for `idle_timeout`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

use crate::chatbot::{GreetingModel, Reply, Session};

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);
pub const DEFAULT_ENDED_GRACE: Duration = Duration::from_secs(5 * 60);

struct TrackedSession {
    session: Session,
    last_active: Instant,
}

impl TrackedSession {
    fn is_expired(&self, now: Instant, idle_timeout: Duration, ended_grace: Duration) -> bool {
        let idle = now.saturating_duration_since(self.last_active);
        if self.session.is_ended() {
            idle >= ended_grace
        } else {
            idle >= idle_timeout
        }
    }
}

pub struct SessionRegistry {
    greeting_model: Arc<dyn GreetingModel>,
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<TrackedSession>>>>,
    idle_timeout: Duration,
    ended_grace: Duration,
}

impl SessionRegistry {
    pub fn new(greeting_model: Arc<dyn GreetingModel>) -> Self {
        Self::with_limits(greeting_model, DEFAULT_IDLE_TIMEOUT, DEFAULT_ENDED_GRACE)
    }

    pub fn with_limits(
        greeting_model: Arc<dyn GreetingModel>,
        idle_timeout: Duration,
        ended_grace: Duration,
    ) -> Self {
        Self {
            greeting_model,
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
            ended_grace,
        }
    }

    /// Open a new conversation and return its id with the greeting
    pub async fn create(&self) -> (Uuid, Reply) {
        self.sweep().await;

        let id = Uuid::new_v4();
        let mut session = Session::new(self.greeting_model.clone());
        let greeting = session.start();

        self.sessions.write().await.insert(
            id,
            Arc::new(Mutex::new(TrackedSession {
                session,
                last_active: Instant::now(),
            })),
        );

        info!("Session {} started", id);
        (id, greeting)
    }

    /// Drop ended and idle sessions. Returns how many were removed.
    pub async fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        // A session locked right now is mid-turn, so it is kept
        sessions.retain(|_, tracked| match tracked.try_lock() {
            Ok(tracked) => !tracked.is_expired(now, self.idle_timeout, self.ended_grace),
            Err(_) => true,
        });

        let removed = before - sessions.len();
        if removed > 0 {
            info!("Evicted {} ended or idle sessions", removed);
        }
        removed
    }

    /// Run `f` against one session. Only that session is locked while `f` runs.
    pub async fn with_session<T>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> T) -> Option<T> {
        let tracked = self.sessions.read().await.get(&id).cloned()?;
        let mut guard = tracked.lock().await;
        guard.last_active = Instant::now();
        Some(f(&mut guard.session))
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!("Session {} reset", id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
