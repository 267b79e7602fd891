//! Driving port for question use-cases.
//!
//! Inbound adapters call this port with the caller's access token; every
//! operation is gated on an active session before the content store is
//! touched.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, Question, QuestionId};

/// Request to post a new question.
#[derive(Debug, Clone)]
pub struct CreateQuestionRequest {
    /// Token of the acting session.
    pub token: AccessToken,
    /// Question text.
    pub content: String,
}

/// Request to replace a question's text.
#[derive(Debug, Clone)]
pub struct EditQuestionRequest {
    /// Token of the acting session.
    pub token: AccessToken,
    /// Question to edit.
    pub question_id: QuestionId,
    /// Replacement text.
    pub content: String,
}

/// Domain use-case port for questions.
#[async_trait]
pub trait QuestionLifecycle: Send + Sync {
    /// Post a question owned by the acting user.
    async fn create_question(&self, request: CreateQuestionRequest) -> Result<Question, Error>;

    /// List every question. Any active session may read.
    async fn list_questions(&self, token: &AccessToken) -> Result<Vec<Question>, Error>;

    /// Replace a question's text. Only the author may edit.
    async fn edit_question(&self, request: EditQuestionRequest) -> Result<Question, Error>;
}
