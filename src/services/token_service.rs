//! Simulated session tokens.
//!
//! A token is the standard base64 encoding of `{"userId": .., "exp": ..}`.
//! It is neither signed nor encrypted: anyone who can write the store can
//! forge one. It only stands in for a server-issued token in a local app.

use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::services::clock::Clock;
use crate::types::session::TokenClaims;
use crate::types::user::User;

/// Issues and checks session tokens against an injected clock.
#[derive(Debug, Clone)]
pub struct TokenService {
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl TokenService {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self { clock, ttl }
    }

    /// Mints a token for `user` expiring `ttl` from now.
    pub fn generate_token(&self, user: &User) -> String {
        let claims = TokenClaims {
            user_id: user.id.clone(),
            exp: self
                .clock
                .now_millis()
                .saturating_add(i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX)),
        };
        Self::encode(&claims)
    }

    pub fn encode(claims: &TokenClaims) -> String {
        // TokenClaims holds only a String and an i64, so encoding cannot fail.
        let json = serde_json::to_vec(claims).unwrap_or_default();
        BASE64.encode(json)
    }

    /// Decodes a token; any malformed input yields `None`.
    pub fn decode_token(&self, token: &str) -> Option<TokenClaims> {
        let bytes = BASE64.decode(token.trim()).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// True when the token decodes and its expiry is still in the future.
    pub fn validate_token(&self, token: &str) -> bool {
        match self.decode_token(token) {
            Some(claims) => claims.exp > self.clock.now_millis(),
            None => false,
        }
    }
}
