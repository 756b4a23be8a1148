//! In-memory session store with lazy expiry.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

use crate::observability::metrics;

/// An issued session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer token (UUID v4 from the OS CSPRNG).
    pub token: String,
    pub user_id: u64,
    pub expires_at: SystemTime,
}

impl Session {
    /// A session is expired once `now` is strictly past `expires_at`.
    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        now > self.expires_at
    }
}

/// Token → session map shared across request handlers.
///
/// Expired entries are only removed when looked up; nothing sweeps them.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<DashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a session for `user_id` that lives for `ttl`.
    pub fn create(&self, user_id: u64, ttl: Duration) -> Session {
        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id,
            expires_at: SystemTime::now() + ttl,
        };
        self.inner.insert(session.token.clone(), session.clone());
        session
    }

    /// Look up a live session.
    pub fn resolve(&self, token: &str) -> Option<Session> {
        self.resolve_at(token, SystemTime::now())
    }

    /// Look up a session as of `now`, dropping it if it has expired.
    pub fn resolve_at(&self, token: &str, now: SystemTime) -> Option<Session> {
        // Clone out so the shard lock is released before any removal.
        let session = self.inner.get(token).map(|r| r.value().clone())?;

        if session.is_expired_at(now) {
            // Only remove if still expired; a concurrent writer may have replaced it.
            if self.inner.remove_if(token, |_, s| s.is_expired_at(now)).is_some() {
                metrics::record_session_expired();
            }
            return None;
        }

        Some(session)
    }

    /// Remove a session. Returns whether one was present.
    pub fn revoke(&self, token: &str) -> bool {
        self.inner.remove(token).is_some()
    }

    /// Number of stored sessions, expired ones included.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(60 * 60);

    #[test]
    fn test_create_then_resolve() {
        let store = SessionStore::new();
        let session = store.create(1, HOUR);

        let found = store.resolve(&session.token).unwrap();
        assert_eq!(found, session);
        assert_eq!(found.user_id, 1);
        assert!(store.resolve("not-a-token").is_none());
    }

    #[test]
    fn test_expired_session_is_removed_on_lookup() {
        let store = SessionStore::new();
        let session = store.create(1, HOUR);

        // Exactly at the deadline it is still valid.
        assert!(store.resolve_at(&session.token, session.expires_at).is_some());

        let later = session.expires_at + Duration::from_millis(1);
        assert!(store.resolve_at(&session.token, later).is_none());
        assert!(store.is_empty());

        // And it stays gone.
        assert!(store.resolve(&session.token).is_none());
    }

    #[test]
    fn test_expired_entries_linger_until_looked_up() {
        let store = SessionStore::new();
        let session = store.create(7, Duration::ZERO);
        std::thread::sleep(Duration::from_millis(5));

        assert_eq!(store.len(), 1);
        assert!(store.resolve(&session.token).is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_revoke_is_idempotent() {
        let store = SessionStore::new();
        let session = store.create(1, HOUR);

        assert!(store.revoke(&session.token));
        assert!(!store.revoke(&session.token));
        assert!(store.resolve(&session.token).is_none());
    }

    #[test]
    fn test_multiple_sessions_per_user() {
        let store = SessionStore::new();
        let a = store.create(1, HOUR);
        let b = store.create(1, HOUR);

        assert_ne!(a.token, b.token);
        store.revoke(&a.token);
        assert!(store.resolve(&b.token).is_some());
    }

    #[test]
    fn test_tokens_are_uuid_v4() {
        let store = SessionStore::new();
        let token = store.create(1, HOUR).token;
        let parsed = Uuid::parse_str(&token).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_concurrent_create_resolve_revoke() {
        let store = SessionStore::new();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let store = store.clone();
                scope.spawn(move || {
                    for i in 0..200 {
                        let session = store.create(i, HOUR);
                        assert!(store.resolve(&session.token).is_some());
                        assert!(store.revoke(&session.token));
                        assert!(store.resolve(&session.token).is_none());
                    }
                });
            }
        });

        assert!(store.is_empty());
    }
}
