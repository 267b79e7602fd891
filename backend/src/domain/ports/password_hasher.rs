//! Port for deriving and checking password digests.

use serde::{Deserialize, Serialize};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hasher adapters.
    pub enum PasswordHasherError {
        /// The digest could not be computed or decoded.
        Hashing {
            /// Adapter-provided failure detail.
            message: String,
        } => "password hashing failed: {message}",
    }
}

/// Salt and digest pair stored in place of the plaintext password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordDigest {
    /// Hex-encoded salt.
    pub salt: String,
    /// Hex-encoded digest of salt and password.
    pub hash: String,
}

/// Hashing capability used during signup and sign-in.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Derive a fresh salted digest for `password`.
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHasherError>;

    /// Check `password` against a stored digest.
    fn verify(&self, password: &str, digest: &PasswordDigest)
    -> Result<bool, PasswordHasherError>;
}
