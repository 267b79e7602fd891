//! Sign-in sessions and the opaque tokens that identify them.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::User;

const GENERATED_TOKEN_BYTES: usize = 32;

/// Opaque bearer token presented with every gated operation.
///
/// The `Debug` output is redacted so tokens do not leak into logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a caller-provided token. No shape is imposed; unknown tokens
    /// simply fail to resolve.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Generate a random hex token suitable for a fresh session.
    pub fn generate() -> Self {
        let mut bytes = [0_u8; GENERATED_TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Raw token value for store lookups.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(**redacted**)")
    }
}

impl From<&str> for AccessToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Session record created on sign-in and closed on sign-out.
///
/// ## Invariants
/// - A session is active iff `logout_at` is unset.
/// - Sessions are never deleted; sign-out only stamps `logout_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Token identifying the session.
    pub token: AccessToken,
    /// The signed-in user, including their role.
    pub user: User,
    /// When the user signed in.
    pub login_at: DateTime<Utc>,
    /// When the user signed out, if they have.
    pub logout_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Open a new, active session.
    pub fn open(token: AccessToken, user: User, login_at: DateTime<Utc>) -> Self {
        Self {
            token,
            user,
            login_at,
            logout_at: None,
        }
    }

    /// Whether the session is still signed in.
    pub fn is_active(&self) -> bool {
        self.logout_at.is_none()
    }

    /// Stamp the sign-out time. Repeated sign-outs keep the first timestamp.
    pub fn close(&mut self, logout_at: DateTime<Utc>) {
        if self.logout_at.is_none() {
            self.logout_at = Some(logout_at);
        }
    }
}
