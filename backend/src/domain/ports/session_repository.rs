//! Port for resolving access tokens to sign-in sessions.
//!
//! Sessions are created and closed by the sign-in/sign-out flow; the
//! authorization gate only ever reads them through this port.

use async_trait::async_trait;

use crate::domain::{AccessToken, Session};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionRepositoryError {
        /// Store connection could not be established.
        Connection {
            /// Adapter-provided failure detail.
            message: String,
        } => "session store connection failed: {message}",
        /// Lookup failed during execution.
        Query {
            /// Adapter-provided failure detail.
            message: String,
        } => "session store query failed: {message}",
    }
}

/// Read access to the session store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fetch the session issued for `token`.
    ///
    /// Returns `None` when the token was never issued. Signed-out sessions
    /// are still returned, with `logout_at` set.
    async fn find_by_token(
        &self,
        token: &AccessToken,
    ) -> Result<Option<Session>, SessionRepositoryError>;
}
