//! Port abstraction for user account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId, Username};

use super::PasswordDigest;
use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection {
            /// Adapter-provided failure detail.
            message: String,
        } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query {
            /// Adapter-provided failure detail.
            message: String,
        } => "user repository query failed: {message}",
        /// Another account already uses the username.
        DuplicateUsername {
            /// Username that collided.
            username: String,
        } => "username already registered: {username}",
        /// Another account already uses the email address.
        DuplicateEmail {
            /// Email address that collided.
            email: String,
        } => "email already registered: {email}",
    }
}

/// A stored account: the public user plus its password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Public user record.
    pub user: User,
    /// Salted password digest.
    pub password: PasswordDigest,
}

/// Account storage used by registration and sign-in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// Adapters must reject a duplicate username or email with
    /// [`UserPersistenceError::DuplicateUsername`] or
    /// [`UserPersistenceError::DuplicateEmail`].
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch an account by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch an account by email address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;
}
