//! Driving port for answer use-cases.

use async_trait::async_trait;

use crate::domain::{AccessToken, Answer, AnswerId, AnswerWithQuestion, Error, QuestionId};

/// Request to answer an existing question.
#[derive(Debug, Clone)]
pub struct CreateAnswerRequest {
    /// Token of the acting session.
    pub token: AccessToken,
    /// Question being answered.
    pub question_id: QuestionId,
    /// Answer text.
    pub content: String,
}

/// Request to replace an answer's text.
#[derive(Debug, Clone)]
pub struct EditAnswerRequest {
    /// Token of the acting session.
    pub token: AccessToken,
    /// Answer to edit.
    pub answer_id: AnswerId,
    /// Replacement text.
    pub content: String,
}

/// Request to remove an answer.
#[derive(Debug, Clone)]
pub struct DeleteAnswerRequest {
    /// Token of the acting session.
    pub token: AccessToken,
    /// Answer to delete.
    pub answer_id: AnswerId,
}

/// Request to list a question's answers.
#[derive(Debug, Clone)]
pub struct ListAnswersRequest {
    /// Token of the acting session.
    pub token: AccessToken,
    /// Question whose answers are listed.
    pub question_id: QuestionId,
}

/// Domain use-case port for answers.
#[async_trait]
pub trait AnswerLifecycle: Send + Sync {
    /// Post an answer owned by the acting user. The question must exist.
    async fn create_answer(&self, request: CreateAnswerRequest) -> Result<Answer, Error>;

    /// Replace an answer's text. Only the author may edit.
    async fn edit_answer(&self, request: EditAnswerRequest) -> Result<Answer, Error>;

    /// Remove an answer. The author or any admin may delete.
    async fn delete_answer(&self, request: DeleteAnswerRequest) -> Result<(), Error>;

    /// List a question's answers, each paired with the question text.
    async fn list_answers(
        &self,
        request: ListAnswersRequest,
    ) -> Result<Vec<AnswerWithQuestion>, Error>;
}
