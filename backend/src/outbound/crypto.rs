//! Salted SHA-256 password hashing.

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::domain::ports::{PasswordDigest, PasswordHasher, PasswordHasherError};

const SALT_BYTES: usize = 16;

fn digest_hex(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hashes `salt || password` with SHA-256 using a random per-password salt.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256PasswordHasher;

impl PasswordHasher for Sha256PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHasherError> {
        let mut salt = [0_u8; SALT_BYTES];
        rand::thread_rng()
            .try_fill_bytes(&mut salt)
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))?;
        Ok(PasswordDigest {
            salt: hex::encode(salt),
            hash: digest_hex(&salt, password),
        })
    }

    fn verify(
        &self,
        password: &str,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHasherError> {
        let salt = hex::decode(&digest.salt)
            .map_err(|err| PasswordHasherError::hashing(format!("invalid salt: {err}")))?;
        Ok(digest_hex(&salt, password) == digest.hash)
    }
}
