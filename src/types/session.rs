use serde::{Deserialize, Serialize};

use super::user::User;

/// Payload carried inside a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Expiry instant in milliseconds since the Unix epoch.
    pub exp: i64,
}

/// The authenticated user together with the token that proves it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Lifecycle of the process-wide session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Persisted session data has not been inspected yet.
    Loading,
    Unauthenticated,
    Authenticated(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Same-site policy recorded on the persisted token cookie.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// Cookie-like record holding the session token.
///
/// Its own expiry is independent of the expiry encoded in the token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionCookie {
    pub value: String,
    /// Milliseconds since the Unix epoch.
    pub expires_at: i64,
    pub same_site: SameSite,
}
