//! Session store kept in process memory.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{SessionRepository, SessionRepositoryError};
use crate::domain::{AccessToken, Session, User};

/// Session repository that also models sign-in and sign-out.
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<AccessToken, Session>>,
    clock: Arc<dyn Clock>,
}

impl InMemorySessionRepository {
    /// Create an empty store stamping sessions with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<AccessToken, Session>>, SessionRepositoryError> {
        self.sessions
            .lock()
            .map_err(|_| SessionRepositoryError::query("session map lock poisoned"))
    }

    /// Sign `user` in under a freshly generated token.
    pub fn open_session(&self, user: User) -> Result<AccessToken, SessionRepositoryError> {
        let token = AccessToken::generate();
        let session = Session::open(token.clone(), user, self.clock.utc());
        self.insert(session)?;
        Ok(token)
    }

    /// Store `session` as-is, replacing any session with the same token.
    pub fn insert(&self, session: Session) -> Result<(), SessionRepositoryError> {
        self.lock()?.insert(session.token.clone(), session);
        Ok(())
    }

    /// Mark the session for `token` as signed out.
    ///
    /// Returns `Ok(false)` when the token was never issued. Signing out twice
    /// keeps the first sign-out time.
    pub fn sign_out(&self, token: &AccessToken) -> Result<bool, SessionRepositoryError> {
        let now = self.clock.utc();
        let mut sessions = self.lock()?;
        let Some(session) = sessions.get_mut(token) else {
            return Ok(false);
        };
        session.close(now);
        debug!(user_id = %session.user.id(), "session closed");
        Ok(true)
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_by_token(
        &self,
        token: &AccessToken,
    ) -> Result<Option<Session>, SessionRepositoryError> {
        Ok(self.lock()?.get(token).cloned())
    }
}
