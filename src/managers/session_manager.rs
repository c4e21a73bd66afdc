//! Session Manager for Link Saver.
//!
//! Owns the process-wide session: `Loading` until persisted data has been
//! inspected, then `Authenticated` or `Unauthenticated`. Login, registration
//! and logout replace the state wholesale. The only keys written here are the
//! token cookie and the cached session user.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::database::{KeyValueStore, AUTH_TOKEN_KEY, SESSION_USER_KEY};
use crate::managers::credential_manager::CredentialStore;
use crate::services::clock::Clock;
use crate::services::token_service::TokenService;
use crate::types::errors::AuthError;
use crate::types::session::{SameSite, Session, SessionCookie, SessionState};
use crate::types::settings::AppConfig;
use crate::types::user::User;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Session state machine backed by a [`KeyValueStore`].
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    credentials: Arc<dyn CredentialStore>,
    tokens: TokenService,
    clock: Arc<dyn Clock>,
    cookie_ttl_millis: i64,
    auth_delay: Duration,
    state: RwLock<SessionState>,
}

impl SessionManager {
    /// Creates a manager in the `Loading` state. Call [`SessionManager::load`] next.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        credentials: Arc<dyn CredentialStore>,
        clock: Arc<dyn Clock>,
        config: &AppConfig,
    ) -> Self {
        Self {
            store,
            credentials,
            tokens: TokenService::new(Arc::clone(&clock), Duration::from_secs(config.token_ttl_secs)),
            clock,
            cookie_ttl_millis: i64::try_from(config.cookie_ttl_days)
                .unwrap_or(i64::MAX)
                .saturating_mul(MILLIS_PER_DAY),
            auth_delay: Duration::from_millis(config.auth_delay_ms),
            state: RwLock::new(SessionState::Loading),
        }
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn current_session(&self) -> Option<Session> {
        self.state.read().await.session().cloned()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.current_session().await.map(|s| s.user)
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn generate_token(&self, user: &User) -> String {
        self.tokens.generate_token(user)
    }

    pub fn validate_token(&self, token: &str) -> bool {
        self.tokens.validate_token(token)
    }

    /// Restores the persisted session if its token is still valid.
    ///
    /// Anything stale or unreadable is cleared and the state becomes
    /// `Unauthenticated`. Expired tokens are never refreshed.
    pub async fn load(&self) -> SessionState {
        let next = match self.read_persisted().await {
            Some(session) if self.is_session_valid(&session) => {
                tracing::info!(user_id = %session.user.id, "Restored session");
                SessionState::Authenticated(session)
            }
            _ => {
                self.clear_persisted().await;
                SessionState::Unauthenticated
            }
        };
        *self.state.write().await = next.clone();
        next
    }

    /// Logs in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.simulate_latency().await;

        let user = self
            .credentials
            .find_by_email(email)
            .await
            .ok_or(AuthError::UserNotFound)?;
        if !self.credentials.verify_password(&user, password).await {
            tracing::info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidPassword);
        }

        self.start_session(user).await
    }

    /// Registers a new account and logs it in.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        self.simulate_latency().await;
        let user = self.credentials.register(name, email, password).await?;
        self.start_session(user).await
    }

    /// Ends the session. Never fails; storage errors are only logged.
    pub async fn logout(&self) {
        self.clear_persisted().await;
        *self.state.write().await = SessionState::Unauthenticated;
        tracing::info!("Logged out");
    }

    async fn simulate_latency(&self) {
        if !self.auth_delay.is_zero() {
            tokio::time::sleep(self.auth_delay).await;
        }
    }

    async fn start_session(&self, user: User) -> Result<User, AuthError> {
        let token = self.tokens.generate_token(&user);
        self.persist(&user, &token).await?;
        *self.state.write().await = SessionState::Authenticated(Session {
            token,
            user: user.clone(),
        });
        tracing::info!(user_id = %user.id, "Session started");
        Ok(user)
    }

    fn is_session_valid(&self, session: &Session) -> bool {
        match self.tokens.decode_token(&session.token) {
            Some(claims) if claims.user_id != session.user.id => {
                tracing::warn!("Persisted token belongs to a different user");
                false
            }
            Some(_) => self.tokens.validate_token(&session.token),
            None => false,
        }
    }

    async fn persist(&self, user: &User, token: &str) -> Result<(), AuthError> {
        let cookie = SessionCookie {
            value: token.to_string(),
            expires_at: self.clock.now_millis().saturating_add(self.cookie_ttl_millis),
            same_site: SameSite::Strict,
        };
        let cookie_json =
            serde_json::to_string(&cookie).map_err(|e| AuthError::Serialization(e.to_string()))?;
        let user_json =
            serde_json::to_string(user).map_err(|e| AuthError::Serialization(e.to_string()))?;

        self.store.set(AUTH_TOKEN_KEY, &cookie_json).await?;
        self.store.set(SESSION_USER_KEY, &user_json).await?;
        Ok(())
    }

    async fn read_persisted(&self) -> Option<Session> {
        let cookie: SessionCookie = self.read_json(AUTH_TOKEN_KEY).await?;
        if cookie.expires_at <= self.clock.now_millis() {
            tracing::debug!("Session cookie expired");
            return None;
        }
        let user: User = self.read_json(SESSION_USER_KEY).await?;
        Some(Session {
            token: cookie.value,
            user,
        })
    }

    async fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key, error = %e, "Could not read session data");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding unreadable session data");
                None
            }
        }
    }

    async fn clear_persisted(&self) {
        for key in [AUTH_TOKEN_KEY, SESSION_USER_KEY] {
            if let Err(e) = self.store.delete(key).await {
                tracing::warn!(key, error = %e, "Could not clear session data");
            }
        }
    }
}
