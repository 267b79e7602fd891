//! Question lifecycle service.
//!
//! Implements [`QuestionLifecycle`]. Each call opens one content transaction
//! and validates the session inside it, so the session check, lookup,
//! ownership check and write form one unit. A session closed while the call
//! waits for the transaction is seen as signed out.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::content_errors::map_content_error;
use crate::domain::ports::{
    ContentStore, ContentTransaction, CreateQuestionRequest, EditQuestionRequest,
    QuestionLifecycle, SessionRepository,
};
use crate::domain::{
    AccessToken, AuthorizationGate, Error, GatedOperation, OWNER_ONLY, Question,
    authorize_owner_or_role,
};

/// Question service implementing the question driving port.
pub struct QuestionService<S, C> {
    gate: AuthorizationGate<S>,
    content: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<S, C> Clone for QuestionService<S, C> {
    fn clone(&self) -> Self {
        Self {
            gate: self.gate.clone(),
            content: Arc::clone(&self.content),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> QuestionService<S, C> {
    /// Create a new service from the gate, the content store and a clock.
    pub fn new(gate: AuthorizationGate<S>, content: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            gate,
            content,
            clock,
        }
    }
}

#[async_trait]
impl<S, C> QuestionLifecycle for QuestionService<S, C>
where
    S: SessionRepository,
    C: ContentStore,
{
    async fn create_question(&self, request: CreateQuestionRequest) -> Result<Question, Error> {
        let mut tx = self.content.begin().await.map_err(map_content_error)?;
        let session = self
            .gate
            .validate_session(&request.token, GatedOperation::CreateQuestion)
            .await?;

        let question = Question::new(
            session.user.id().clone(),
            request.content,
            self.clock.utc(),
        );
        tx.save_question(&question)
            .await
            .map_err(map_content_error)?;
        tx.commit().await.map_err(map_content_error)?;

        info!(question_id = %question.id, user_id = %question.author, "question created");
        Ok(question)
    }

    async fn list_questions(&self, token: &AccessToken) -> Result<Vec<Question>, Error> {
        let mut tx = self.content.begin().await.map_err(map_content_error)?;
        self.gate
            .validate_session(token, GatedOperation::ListQuestions)
            .await?;

        let questions = tx.list_questions().await.map_err(map_content_error)?;
        tx.commit().await.map_err(map_content_error)?;
        Ok(questions)
    }

    async fn edit_question(&self, request: EditQuestionRequest) -> Result<Question, Error> {
        let operation = GatedOperation::EditQuestion;
        let mut tx = self.content.begin().await.map_err(map_content_error)?;
        let session = self.gate.validate_session(&request.token, operation).await?;

        let mut question = tx
            .find_question(&request.question_id)
            .await
            .map_err(map_content_error)?
            .ok_or_else(|| {
                Error::question_not_found("Entered question uuid does not exist")
                    .with_details(json!({ "questionId": request.question_id }))
            })?;

        authorize_owner_or_role(&session, &question.author, OWNER_ONLY, operation)?;

        question.content = request.content;
        tx.save_question(&question)
            .await
            .map_err(map_content_error)?;
        tx.commit().await.map_err(map_content_error)?;

        info!(question_id = %question.id, user_id = %session.user.id(), "question edited");
        Ok(question)
    }
}

#[cfg(test)]
#[path = "question_service_tests.rs"]
mod tests;
