//! Login, session lookup and logout.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::auth::accounts::AccountStore;
use crate::auth::sessions::{Session, SessionStore};
use crate::observability::metrics;

/// Login failures as seen by the caller.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user or wrong password. The two are never told apart.
    #[error("invalid username or password")]
    Unauthorized,

    /// The verification task did not complete.
    #[error("credential check failed: {0}")]
    Internal(String),
}

/// Issues, resolves and revokes sessions for a fixed account set.
pub struct Authenticator {
    accounts: Arc<AccountStore>,
    sessions: SessionStore,
    ttl: Duration,
}

impl Authenticator {
    pub fn new(accounts: AccountStore, sessions: SessionStore, ttl: Duration) -> Self {
        Self {
            accounts: Arc::new(accounts),
            sessions,
            ttl,
        }
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Verify credentials and open a session.
    ///
    /// Argon2 runs on the blocking pool.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let accounts = Arc::clone(&self.accounts);
        let (user, pass) = (username.to_owned(), password.to_owned());

        let verified = tokio::task::spawn_blocking(move || {
            accounts.verify_credentials(&user, &pass).map(|a| a.id)
        })
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?;

        let Some(user_id) = verified else {
            tracing::warn!(username = %username.escape_debug(), "Login failed");
            metrics::record_login("failure");
            return Err(AuthError::Unauthorized);
        };

        let session = self.sessions.create(user_id, self.ttl);
        tracing::info!(user_id, "Login succeeded");
        metrics::record_login("success");
        Ok(session)
    }

    /// Live session for `token`, if any.
    pub fn resolve(&self, token: &str) -> Option<Session> {
        self.sessions.resolve(token)
    }

    /// Drop the session for `token`. Unknown tokens are ignored.
    pub fn logout(&self, token: &str) {
        if self.sessions.revoke(token) {
            tracing::info!("Session revoked");
        }
    }

    /// Username behind a session.
    pub fn username_for(&self, session: &Session) -> Option<&str> {
        self.accounts
            .find_by_id(session.user_id)
            .map(|a| a.username.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PasswordHashConfig;

    fn authenticator(ttl: Duration) -> Authenticator {
        let cost = PasswordHashConfig {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        };
        let accounts = AccountStore::with_demo_accounts(&cost).unwrap();
        Authenticator::new(accounts, SessionStore::new(), ttl)
    }

    #[tokio::test]
    async fn test_login_resolve_logout() {
        let auth = authenticator(Duration::from_secs(3600));

        let session = auth.login("student", "password123").await.unwrap();
        let resolved = auth.resolve(&session.token).unwrap();
        assert_eq!(auth.username_for(&resolved), Some("student"));

        auth.logout(&session.token);
        assert!(auth.resolve(&session.token).is_none());
        auth.logout(&session.token);
    }

    #[tokio::test]
    async fn test_failures_are_indistinguishable() {
        let auth = authenticator(Duration::from_secs(3600));

        let wrong_password = auth.login("student", "nope").await.unwrap_err();
        let unknown_user = auth.login("mallory", "password123").await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::Unauthorized));
        assert!(matches!(unknown_user, AuthError::Unauthorized));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(auth.sessions().is_empty());
    }

    #[tokio::test]
    async fn test_session_expires_after_ttl() {
        let auth = authenticator(Duration::from_millis(50));
        let session = auth.login("student", "password123").await.unwrap();

        assert!(auth.resolve(&session.token).is_some());
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(auth.resolve(&session.token).is_none());
    }
}
