//! Credential Manager for Link Saver.
//!
//! Owns the registered-user directory: a JSON array of [`User`] stored under
//! one key. Lookups are linear scans; the directory is local and small.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use zeroize::Zeroizing;

use crate::database::collections::{load_list, load_list_for_update, preserve_corrupt, save_list, ListRead};
use crate::database::{KeyValueStore, USERS_KEY};
use crate::services::clock::{unique_time_id, Clock};
use crate::services::crypto_service::{CryptoService, CryptoServiceTrait};
use crate::types::errors::AuthError;
use crate::types::user::User;

/// Trait defining the registered-user directory.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn list_users(&self) -> Vec<User>;
    async fn find_by_email(&self, email: &str) -> Option<User>;
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError>;
    async fn verify_password(&self, user: &User, password: &str) -> bool;
}

/// User directory persisted in a [`KeyValueStore`].
pub struct CredentialManager {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    crypto: Arc<CryptoService>,
    iterations: u32,
    /// Serializes read-modify-write of the user list within this process.
    write_lock: Mutex<()>,
}

impl CredentialManager {
    /// `iterations` is the PBKDF2 cost applied to newly registered passwords.
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, iterations: u32) -> Self {
        Self {
            store,
            clock,
            crypto: Arc::new(CryptoService::new()),
            iterations,
            write_lock: Mutex::new(()),
        }
    }

    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let crypto = Arc::clone(&self.crypto);
        let password = Zeroizing::new(password.to_string());
        let iterations = self.iterations;
        tokio::task::spawn_blocking(move || crypto.hash_password(&password, iterations))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
    }
}

#[async_trait]
impl CredentialStore for CredentialManager {
    /// All registered users; empty when storage is unreadable or corrupt.
    async fn list_users(&self) -> Vec<User> {
        load_list(self.store.as_ref(), USERS_KEY).await.items
    }

    /// Exact, case-sensitive email match.
    async fn find_by_email(&self, email: &str) -> Option<User> {
        self.list_users().await.into_iter().find(|u| u.email == email)
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let _guard = self.write_lock.lock().await;

        let ListRead { items: mut users, corrupt } =
            load_list_for_update::<User>(self.store.as_ref(), USERS_KEY).await?;
        if users.iter().any(|u| u.email == email) {
            tracing::debug!("Registration rejected: email already registered");
            return Err(AuthError::AlreadyExists(email.to_string()));
        }

        let password_hash = self.hash_password(password).await?;
        let id = unique_time_id(self.clock.now_millis(), |id| users.iter().any(|u| u.id == id));
        let user = User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            created_at: self.clock.now_utc(),
            password_hash,
        };

        if let Some(raw) = corrupt {
            preserve_corrupt(self.store.as_ref(), USERS_KEY, &raw).await?;
        }
        users.push(user.clone());
        save_list(self.store.as_ref(), USERS_KEY, &users).await?;

        tracing::info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    /// Constant-time check of `password` against the user's stored hash.
    async fn verify_password(&self, user: &User, password: &str) -> bool {
        let crypto = Arc::clone(&self.crypto);
        let password = Zeroizing::new(password.to_string());
        let encoded = user.password_hash.clone();
        tokio::task::spawn_blocking(move || crypto.verify_password(&password, &encoded))
            .await
            .unwrap_or(false)
    }
}
