//! Authorization gate shared by every content operation.
//!
//! Two checks compose in a fixed order. [`AuthorizationGate::validate_session`]
//! resolves the caller's token to an active session. Once the target resource
//! is known to exist, [`authorize_owner_or_role`] decides whether the acting
//! user may touch it. Session failures therefore always win over missing
//! resources, and missing resources always win over ownership failures.

use std::fmt;
use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::ports::{SessionRepository, SessionRepositoryError};
use crate::domain::{AccessToken, Error, Role, Session, UserId};

/// Allowed roles when only the owner may act.
pub const OWNER_ONLY: &[Role] = &[];

/// Allowed roles when admins may act on content they do not own.
pub const OWNER_OR_ADMIN: &[Role] = &[Role::Admin];

const NOT_SIGNED_IN_MESSAGE: &str = "User has not signed in";

/// Operation passing through the gate; selects the wording of failures and
/// tags log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatedOperation {
    /// Posting a question.
    CreateQuestion,
    /// Listing every question.
    ListQuestions,
    /// Replacing a question's text.
    EditQuestion,
    /// Posting an answer.
    CreateAnswer,
    /// Replacing an answer's text.
    EditAnswer,
    /// Removing an answer.
    DeleteAnswer,
    /// Listing a question's answers.
    ListAnswers,
}

impl GatedOperation {
    /// Snake-case name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateQuestion => "create_question",
            Self::ListQuestions => "list_questions",
            Self::EditQuestion => "edit_question",
            Self::CreateAnswer => "create_answer",
            Self::EditAnswer => "edit_answer",
            Self::DeleteAnswer => "delete_answer",
            Self::ListAnswers => "list_answers",
        }
    }

    fn action(self) -> &'static str {
        match self {
            Self::CreateQuestion => "post a question",
            Self::ListQuestions => "get all questions",
            Self::EditQuestion => "edit the question",
            Self::CreateAnswer => "post an answer",
            Self::EditAnswer => "edit an answer",
            Self::DeleteAnswer => "delete an answer",
            Self::ListAnswers => "get the answers",
        }
    }

    /// Message reported when the session has been signed out.
    ///
    /// # Examples
    /// ```
    /// use qna_backend::domain::GatedOperation;
    ///
    /// assert_eq!(
    ///     GatedOperation::CreateAnswer.signed_out_message(),
    ///     "User is signed out. Sign in first to post an answer",
    /// );
    /// ```
    pub fn signed_out_message(self) -> String {
        format!("User is signed out. Sign in first to {}", self.action())
    }

    /// Message reported when the actor may not act on the resource.
    pub fn denial_message(self) -> String {
        match self {
            Self::EditQuestion => "Only the question owner can edit the question".to_owned(),
            Self::EditAnswer => "Only the answer owner can edit the answer".to_owned(),
            Self::DeleteAnswer => "Only the answer owner or admin can delete the answer".to_owned(),
            other => format!("Not permitted to {}", other.action()),
        }
    }
}

impl fmt::Display for GatedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn map_session_error(error: SessionRepositoryError) -> Error {
    match error {
        SessionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("session store unavailable: {message}"))
        }
        SessionRepositoryError::Query { message } => {
            Error::internal(format!("session store error: {message}"))
        }
    }
}

/// Session validation backed by the session store.
pub struct AuthorizationGate<S> {
    sessions: Arc<S>,
}

impl<S> Clone for AuthorizationGate<S> {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<S> AuthorizationGate<S> {
    /// Create a gate reading from the given session store.
    pub fn new(sessions: Arc<S>) -> Self {
        Self { sessions }
    }
}

impl<S> AuthorizationGate<S>
where
    S: SessionRepository,
{
    /// Resolve `token` to an active session.
    ///
    /// Fails with [`ErrorCode::NotSignedIn`](crate::domain::ErrorCode::NotSignedIn)
    /// when the token was never issued and with
    /// [`ErrorCode::SignedOut`](crate::domain::ErrorCode::SignedOut) when the
    /// session has been closed.
    pub async fn validate_session(
        &self,
        token: &AccessToken,
        operation: GatedOperation,
    ) -> Result<Session, Error> {
        let Some(session) = self
            .sessions
            .find_by_token(token)
            .await
            .map_err(map_session_error)?
        else {
            debug!(%operation, code = "not_signed_in", "access denied");
            return Err(Error::not_signed_in(NOT_SIGNED_IN_MESSAGE));
        };

        if !session.is_active() {
            debug!(
                %operation,
                code = "signed_out",
                user_id = %session.user.id(),
                "access denied"
            );
            return Err(Error::signed_out(operation.signed_out_message()));
        }

        Ok(session)
    }
}

/// Allow the action if the acting user owns the resource or holds one of
/// `allowed_roles`.
///
/// Call only after [`AuthorizationGate::validate_session`] has succeeded and
/// the resource has been loaded.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use qna_backend::domain::{
///     authorize_owner_or_role, AccessToken, GatedOperation, Role, Session, User, UserId,
///     OWNER_OR_ADMIN,
/// };
///
/// let admin = User::try_from_strings(
///     "3fa85f64-5717-4562-b3fc-2c963f66afa6",
///     "moderator",
///     "mod@example.org",
///     Role::Admin,
/// )
/// .expect("valid user");
/// let session = Session::open(AccessToken::new("t"), admin, Utc::now());
/// let someone_else = UserId::random();
///
/// assert!(authorize_owner_or_role(
///     &session,
///     &someone_else,
///     OWNER_OR_ADMIN,
///     GatedOperation::DeleteAnswer,
/// )
/// .is_ok());
/// ```
pub fn authorize_owner_or_role(
    session: &Session,
    owner: &UserId,
    allowed_roles: &[Role],
    operation: GatedOperation,
) -> Result<(), Error> {
    let actor = &session.user;
    if actor.id() == owner || allowed_roles.contains(&actor.role()) {
        return Ok(());
    }

    debug!(
        %operation,
        code = "not_authorized",
        user_id = %actor.id(),
        owner_id = %owner,
        "access denied"
    );
    Err(Error::not_authorized(operation.denial_message()).with_details(json!({
        "operation": operation.as_str(),
    })))
}

#[cfg(test)]
#[path = "authorization_tests.rs"]
mod tests;
