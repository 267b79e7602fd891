//! Answer lifecycle service.
//!
//! Every operation opens one content transaction and validates the caller's
//! session inside it, before the parent or target lookup and the dependent
//! write.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::content_errors::map_content_error;
use crate::domain::ports::{
    AnswerLifecycle, ContentStore, ContentTransaction, CreateAnswerRequest, DeleteAnswerRequest,
    EditAnswerRequest, ListAnswersRequest, SessionRepository,
};
use crate::domain::{
    Answer, AnswerId, AnswerWithQuestion, AuthorizationGate, Error, GatedOperation, OWNER_ONLY,
    OWNER_OR_ADMIN, QuestionId, authorize_owner_or_role,
};

fn answer_not_found(answer_id: &AnswerId) -> Error {
    Error::answer_not_found("Entered answer uuid does not exist")
        .with_details(json!({ "answerId": answer_id }))
}

fn question_not_found(message: &str, question_id: &QuestionId) -> Error {
    Error::question_not_found(message).with_details(json!({ "questionId": question_id }))
}

/// Answer service implementing the answer driving port.
pub struct AnswerService<S, C> {
    gate: AuthorizationGate<S>,
    content: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<S, C> Clone for AnswerService<S, C> {
    fn clone(&self) -> Self {
        Self {
            gate: self.gate.clone(),
            content: Arc::clone(&self.content),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> AnswerService<S, C> {
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
impl<S, C> AnswerLifecycle for AnswerService<S, C>
where
    S: SessionRepository,
    C: ContentStore,
{
    async fn create_answer(&self, request: CreateAnswerRequest) -> Result<Answer, Error> {
        let mut tx = self.content.begin().await.map_err(map_content_error)?;
        let session = self
            .gate
            .validate_session(&request.token, GatedOperation::CreateAnswer)
            .await?;

        let question = tx
            .find_question(&request.question_id)
            .await
            .map_err(map_content_error)?
            .ok_or_else(|| {
                question_not_found("The question entered is invalid", &request.question_id)
            })?;

        let answer = Answer::new(
            session.user.id().clone(),
            &question,
            request.content,
            self.clock.utc(),
        );
        tx.save_answer(&answer).await.map_err(map_content_error)?;
        tx.commit().await.map_err(map_content_error)?;

        info!(
            answer_id = %answer.id,
            question_id = %answer.question_id,
            user_id = %answer.author,
            "answer created"
        );
        Ok(answer)
    }

    async fn edit_answer(&self, request: EditAnswerRequest) -> Result<Answer, Error> {
        let operation = GatedOperation::EditAnswer;
        let mut tx = self.content.begin().await.map_err(map_content_error)?;
        let session = self.gate.validate_session(&request.token, operation).await?;

        let mut answer = tx
            .find_answer(&request.answer_id)
            .await
            .map_err(map_content_error)?
            .ok_or_else(|| answer_not_found(&request.answer_id))?;

        authorize_owner_or_role(&session, &answer.author, OWNER_ONLY, operation)?;

        answer.content = request.content;
        tx.save_answer(&answer).await.map_err(map_content_error)?;
        tx.commit().await.map_err(map_content_error)?;

        info!(answer_id = %answer.id, user_id = %session.user.id(), "answer edited");
        Ok(answer)
    }

    async fn delete_answer(&self, request: DeleteAnswerRequest) -> Result<(), Error> {
        let operation = GatedOperation::DeleteAnswer;
        let mut tx = self.content.begin().await.map_err(map_content_error)?;
        let session = self.gate.validate_session(&request.token, operation).await?;

        let answer = tx
            .find_answer(&request.answer_id)
            .await
            .map_err(map_content_error)?
            .ok_or_else(|| answer_not_found(&request.answer_id))?;

        authorize_owner_or_role(&session, &answer.author, OWNER_OR_ADMIN, operation)?;

        let removed = tx
            .delete_answer(&answer.id)
            .await
            .map_err(map_content_error)?;
        if !removed {
            return Err(answer_not_found(&request.answer_id));
        }
        tx.commit().await.map_err(map_content_error)?;

        info!(
            answer_id = %answer.id,
            user_id = %session.user.id(),
            role = session.user.role().as_str(),
            "answer deleted"
        );
        Ok(())
    }

    async fn list_answers(
        &self,
        request: ListAnswersRequest,
    ) -> Result<Vec<AnswerWithQuestion>, Error> {
        let mut tx = self.content.begin().await.map_err(map_content_error)?;
        self.gate
            .validate_session(&request.token, GatedOperation::ListAnswers)
            .await?;

        let question = tx
            .find_question(&request.question_id)
            .await
            .map_err(map_content_error)?
            .ok_or_else(|| {
                question_not_found(
                    "The question with entered uuid whose details are to be seen does not exist",
                    &request.question_id,
                )
            })?;
        let answers = tx
            .list_answers_for_question(&question.id)
            .await
            .map_err(map_content_error)?;
        tx.commit().await.map_err(map_content_error)?;

        Ok(answers
            .into_iter()
            .map(|answer| AnswerWithQuestion {
                answer,
                question_content: question.content.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "answer_service_tests.rs"]
mod tests;
