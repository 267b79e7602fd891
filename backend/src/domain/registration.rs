//! Account signup service.
//!
//! Registration validates the requested identity, refuses duplicates (the
//! username is checked before the email), hashes the password through the
//! [`PasswordHasher`] port and stores the account.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    PasswordHasher, PasswordHasherError, SignupRequest, UserAccount, UserPersistenceError,
    UserRegistration, UserRepository,
};
use crate::domain::{EmailAddress, Error, User, UserId, UserValidationError, Username};

/// Password assigned when a signup request carries none.
pub const DEFAULT_SIGNUP_PASSWORD: &str = "quora@123";

const USERNAME_TAKEN_MESSAGE: &str = "Try any other Username, this Username has already been taken";
const EMAIL_TAKEN_MESSAGE: &str =
    "This user has already been registered, try with any other emailId";

fn invalid_field(field: &str, error: &UserValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::username_taken(USERNAME_TAKEN_MESSAGE)
        }
        UserPersistenceError::DuplicateEmail { .. } => Error::email_taken(EMAIL_TAKEN_MESSAGE),
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

/// Signup service backed by a user store and a password hasher.
pub struct UserRegistrationService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    default_password: Zeroizing<String>,
}

impl<U, H> Clone for UserRegistrationService<U, H> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
            default_password: self.default_password.clone(),
        }
    }
}

impl<U, H> UserRegistrationService<U, H> {
    /// Create a service that assigns [`DEFAULT_SIGNUP_PASSWORD`] to requests
    /// without a password.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self {
            users,
            hasher,
            default_password: Zeroizing::new(DEFAULT_SIGNUP_PASSWORD.to_owned()),
        }
    }

    /// Replace the password assigned to requests without one.
    #[must_use]
    pub fn with_default_password(mut self, password: impl Into<String>) -> Self {
        self.default_password = Zeroizing::new(password.into());
        self
    }
}

impl<U, H> UserRegistrationService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn ensure_available(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<(), Error> {
        if self
            .users
            .find_by_username(username)
            .await
            .map_err(map_persistence_error)?
            .is_some()
        {
            debug!(%username, code = "username_taken", "signup rejected");
            return Err(Error::username_taken(USERNAME_TAKEN_MESSAGE));
        }

        if self
            .users
            .find_by_email(email)
            .await
            .map_err(map_persistence_error)?
            .is_some()
        {
            debug!(%username, code = "email_taken", "signup rejected");
            return Err(Error::email_taken(EMAIL_TAKEN_MESSAGE));
        }

        Ok(())
    }
}

#[async_trait]
impl<U, H> UserRegistration for UserRegistrationService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, request: SignupRequest) -> Result<User, Error> {
        let username =
            Username::new(request.username).map_err(|err| invalid_field("username", &err))?;
        let email = EmailAddress::new(request.email).map_err(|err| invalid_field("email", &err))?;

        self.ensure_available(&username, &email).await?;

        let password = request
            .password
            .unwrap_or_else(|| self.default_password.clone());
        let digest = self
            .hasher
            .hash(password.as_str())
            .map_err(map_hasher_error)?;

        let user = User::new(UserId::random(), username, email, request.role);
        let account = UserAccount {
            user: user.clone(),
            password: digest,
        };
        self.users
            .insert(&account)
            .await
            .map_err(map_persistence_error)?;

        info!(user_id = %user.id(), role = user.role().as_str(), "user registered");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "registration_tests.rs"]
mod tests;
