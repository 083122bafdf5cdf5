//! Per-user session state and the concurrent session store.
//!
//! A session owns everything one user's conversation accumulates: the
//! active query specification, the last result snapshot, and the page
//! cursor. All of it sits behind one `tokio::sync::Mutex` so that two
//! concurrent `handle` calls for the same user serialize instead of
//! interleaving.
//!
//! Resets mutate the state in place. The mutex identity must survive a
//! reset — replacing the session object would orphan a caller already
//! waiting on its lock.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::lobby::ListResponse;
use crate::query::ListQuery;

/// Mutable per-user state. Only touched while the session lock is held.
#[derive(Debug)]
pub struct SessionState {
    /// When this session last handled input
    pub last_trigger: DateTime<Utc>,
    /// Show each item's matching players beneath list rows
    pub show_target_players: bool,
    /// Zero-based page cursor
    pub page_index: i64,
    /// Active query specification; `None` means no active search
    pub query: Option<ListQuery>,
    /// Last fetched result snapshot, superseded wholesale on fetch
    pub snapshot: Option<ListResponse>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            last_trigger: Utc::now(),
            show_target_players: false,
            page_index: 0,
            query: None,
            snapshot: None,
        }
    }

    /// Clear the conversation state in place, keeping the session (and
    /// its lock) alive.
    pub fn reset(&mut self) {
        self.show_target_players = false;
        self.page_index = 0;
        self.query = None;
        self.snapshot = None;
    }

    /// Whether more than `timeout_secs` elapsed since the last trigger.
    #[must_use]
    pub fn idle_longer_than(&self, timeout_secs: u64) -> bool {
        let idle_ms = Utc::now()
            .signed_duration_since(self.last_trigger)
            .num_milliseconds();
        let timeout_ms = i64::try_from(timeout_secs.saturating_mul(1000)).unwrap_or(i64::MAX);
        idle_ms > timeout_ms
    }
}

/// One user's session: state behind a capacity-one lock.
#[derive(Debug)]
pub struct Session {
    state: Mutex<SessionState>,
}

impl Session {
    fn new() -> Self {
        Self {
            state: Mutex::new(SessionState::new()),
        }
    }

    /// Acquire the session lock, serializing all handling for this
    /// user. The guard releases on every exit path, including drops
    /// from caller-side timeouts.
    pub async fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().await
    }
}

/// Concurrent user-id → session map with atomic get-or-create.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
}

impl SessionStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the session for `id`, creating it on first contact. Two
    /// concurrent callers for a new id observe the same session.
    pub async fn get_or_create(&self, id: &str) -> Arc<Session> {
        if let Some(session) = self.sessions.read().await.get(id) {
            return Arc::clone(session);
        }
        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(Session::new())),
        )
    }

    /// Drop the session for `id`, if any. A caller still holding the
    /// session's `Arc` keeps it alive; the store just forgets it.
    pub async fn remove(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_or_create_returns_same_session() {
        let store = SessionStore::new();
        let a = store.get_or_create("user-1").await;
        let b = store.get_or_create("user-1").await;
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn concurrent_creation_yields_one_session() {
        let store = Arc::new(SessionStore::new());
        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.get_or_create("same").await })
            })
            .collect();
        let mut sessions = Vec::new();
        for task in tasks {
            sessions.push(task.await.expect("join"));
        }
        assert_eq!(store.len().await, 1);
        assert!(sessions.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[tokio::test]
    async fn reset_preserves_lock_identity() {
        let store = SessionStore::new();
        let session = store.get_or_create("user-2").await;
        {
            let mut state = session.lock().await;
            state.query = Some(ListQuery::for_servers("x"));
            state.page_index = 3;
            state.reset();
            assert!(state.query.is_none());
            assert_eq!(state.page_index, 0);
        }
        // Same session object still in the store after the reset.
        let again = store.get_or_create("user-2").await;
        assert!(Arc::ptr_eq(&session, &again));
    }

    #[tokio::test]
    async fn remove_forgets_the_session() {
        let store = SessionStore::new();
        let session = store.get_or_create("user-4").await;
        assert!(store.remove("user-4").await);
        assert!(!store.remove("user-4").await);
        assert_eq!(store.len().await, 0);

        // Re-creation yields a fresh session object.
        let fresh = store.get_or_create("user-4").await;
        assert!(!Arc::ptr_eq(&session, &fresh));
    }

    #[tokio::test]
    async fn idle_check_uses_configured_timeout() {
        let store = SessionStore::new();
        let session = store.get_or_create("user-3").await;
        let mut state = session.lock().await;
        assert!(!state.idle_longer_than(600));

        state.last_trigger = Utc::now() - chrono::Duration::seconds(601);
        assert!(state.idle_longer_than(600));
    }
}
