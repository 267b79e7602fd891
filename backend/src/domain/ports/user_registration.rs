//! Driving port for account signup.

use std::fmt;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::{Error, Role, User};

/// Raw signup payload. Fields are validated by the registration service.
#[derive(Clone)]
pub struct SignupRequest {
    /// Requested username.
    pub username: String,
    /// Requested email address.
    pub email: String,
    /// Requested password; the configured default is used when absent.
    pub password: Option<Zeroizing<String>>,
    /// Role to grant.
    pub role: Role,
}

impl SignupRequest {
    /// Build a non-admin signup request with the default password.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: None,
            role: Role::NonAdmin,
        }
    }

    /// Supply an explicit password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(Zeroizing::new(password.into()));
        self
    }

    /// Grant a specific role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "**redacted**"))
            .field("role", &self.role)
            .finish()
    }
}

/// Domain use-case port for registering accounts.
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Create an account, rejecting a taken username before a taken email.
    async fn register(&self, request: SignupRequest) -> Result<User, Error>;
}
