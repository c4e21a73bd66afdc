//! Password hashing for registered accounts.
//!
//! PBKDF2-HMAC-SHA256 from `ring`, with the iteration count as the tunable
//! cost factor. Hashes are self-describing strings so the cost can change
//! without invalidating existing accounts.

use std::num::NonZeroU32;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroize;

use crate::types::errors::AuthError;

/// Scheme tag leading every encoded hash.
pub const HASH_SCHEME: &str = "pbkdf2-sha256";

/// Salt length in bytes.
const SALT_LENGTH: usize = 16;

/// Derived hash length in bytes.
const HASH_LENGTH: usize = 32;

static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

/// Trait defining password hashing operations.
pub trait CryptoServiceTrait {
    /// Hashes `password` with a fresh random salt and `iterations` rounds.
    ///
    /// Output format: `pbkdf2-sha256$<iterations>$<salt b64>$<hash b64>`.
    fn hash_password(&self, password: &str, iterations: u32) -> Result<String, AuthError>;

    /// Checks `password` against an encoded hash in constant time.
    ///
    /// A hash that cannot be decoded never verifies.
    fn verify_password(&self, password: &str, encoded: &str) -> bool;

    /// Generates a cryptographically secure random salt.
    fn generate_salt(&self) -> Result<Vec<u8>, AuthError>;
}

/// Password hashing backed by `ring`.
pub struct CryptoService {
    rng: SystemRandom,
}

impl CryptoService {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }

    fn decode(encoded: &str) -> Option<(NonZeroU32, Vec<u8>, Vec<u8>)> {
        let mut parts = encoded.split('$');
        if parts.next()? != HASH_SCHEME {
            return None;
        }
        let iterations = NonZeroU32::new(parts.next()?.parse().ok()?)?;
        let salt = BASE64.decode(parts.next()?).ok()?;
        let hash = BASE64.decode(parts.next()?).ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some((iterations, salt, hash))
    }
}

impl Default for CryptoService {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoServiceTrait for CryptoService {
    fn hash_password(&self, password: &str, iterations: u32) -> Result<String, AuthError> {
        let rounds = NonZeroU32::new(iterations)
            .ok_or_else(|| AuthError::Hashing("iteration count must be non-zero".to_string()))?;
        let salt = self.generate_salt()?;

        let mut hash = [0u8; HASH_LENGTH];
        pbkdf2::derive(ALGORITHM, rounds, &salt, password.as_bytes(), &mut hash);

        let encoded = format!(
            "{}${}${}${}",
            HASH_SCHEME,
            rounds,
            BASE64.encode(&salt),
            BASE64.encode(hash)
        );
        hash.zeroize();
        Ok(encoded)
    }

    fn verify_password(&self, password: &str, encoded: &str) -> bool {
        match Self::decode(encoded) {
            Some((iterations, salt, hash)) => {
                pbkdf2::verify(ALGORITHM, iterations, &salt, password.as_bytes(), &hash).is_ok()
            }
            None => false,
        }
    }

    fn generate_salt(&self) -> Result<Vec<u8>, AuthError> {
        let mut salt = vec![0u8; SALT_LENGTH];
        self.rng
            .fill(&mut salt)
            .map_err(|_| AuthError::Hashing("failed to generate salt".to_string()))?;
        Ok(salt)
    }
}
