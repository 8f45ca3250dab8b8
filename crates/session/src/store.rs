use chrono::{DateTime, Utc};
use dashmap::DashMap;
use hitl_common::{AssistantError, Message, PendingAction, Result, SessionId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Per-session conversation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// Append-only message history
    pub messages: Vec<Message>,
    /// At most one action held for human approval
    pub pending: Option<PendingAction>,
    pub last_active: DateTime<Utc>,
}

impl Session {
    fn new(id: SessionId) -> Self {
        Self {
            id,
            messages: Vec::new(),
            pending: None,
            last_active: Utc::now(),
        }
    }
}

/// Concurrent session store keyed by session id.
///
/// Sessions are created on first use and evicted once idle longer than the
/// configured TTL.
pub struct SessionStore {
    sessions: DashMap<SessionId, Session>,
    idle_ttl: chrono::Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_ttl: chrono::Duration::from_std(idle_ttl)
                .unwrap_or_else(|_| chrono::Duration::days(365)),
        }
    }

    /// Append a message, creating the session on first use
    pub fn append_message(&self, id: &SessionId, message: Message) {
        let mut session = self
            .sessions
            .entry(id.clone())
            .or_insert_with(|| {
                info!("Creating session {}", id);
                Session::new(id.clone())
            });
        session.messages.push(message);
        session.last_active = Utc::now();
    }

    /// Cloned message history, empty for an unknown session
    pub fn history(&self, id: &SessionId) -> Vec<Message> {
        self.sessions
            .get(id)
            .map(|s| s.messages.clone())
            .unwrap_or_default()
    }

    /// Hold a tool call for approval. Replaces a stale pending action if one
    /// is still there.
    pub fn set_pending(&self, id: &SessionId, action: PendingAction) {
        let mut session = self
            .sessions
            .entry(id.clone())
            .or_insert_with(|| Session::new(id.clone()));
        if let Some(old) = &session.pending {
            warn!(
                "Replacing stale pending action {} for session {}",
                old.approval_id, id
            );
        }
        session.pending = Some(action);
        session.last_active = Utc::now();
    }

    /// Remove and return the pending action for a session
    pub fn take_pending(&self, id: &SessionId) -> Result<PendingAction> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| AssistantError::SessionNotFound(id.to_string()))?;
        session.last_active = Utc::now();
        session
            .pending
            .take()
            .ok_or_else(|| AssistantError::NoPendingAction(id.to_string()))
    }

    pub fn pending(&self, id: &SessionId) -> Option<PendingAction> {
        self.sessions.get(id).and_then(|s| s.pending.clone())
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Evict sessions idle longer than the TTL, returning how many went away
    pub fn evict_idle(&self) -> usize {
        self.evict_older_than(Utc::now())
    }

    fn evict_older_than(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| now - session.last_active <= self.idle_ttl);
        let evicted = before - self.sessions.len();
        if evicted > 0 {
            info!("Evicted {} idle sessions", evicted);
        }
        evicted
    }

    /// Background sweep loop evicting idle sessions on an interval
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let evicted = store.evict_idle();
                debug!(
                    "Session sweep complete: evicted={}, remaining={}",
                    evicted,
                    store.len()
                );
            }
        })
    }
}
