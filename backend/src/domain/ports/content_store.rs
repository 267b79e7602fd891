//! Port for question and answer persistence.
//!
//! Every lifecycle operation runs inside one [`ContentTransaction`]: the
//! service opens it with [`ContentStore::begin`], performs its lookups and
//! writes, and calls [`ContentTransaction::commit`]. Adapters must serialise
//! transactions that touch the same records so nothing can change between a
//! lookup and the write that depends on it. A transaction dropped without a
//! commit leaves the store unchanged.

use async_trait::async_trait;

use crate::domain::{Answer, AnswerId, Question, QuestionId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by content store adapters.
    pub enum ContentStoreError {
        /// Store connection could not be established.
        Connection {
            /// Adapter-provided failure detail.
            message: String,
        } => "content store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query {
            /// Adapter-provided failure detail.
            message: String,
        } => "content store query failed: {message}",
    }
}

/// Entry point for content persistence.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Transaction handle produced by this store.
    type Transaction: ContentTransaction;

    /// Open a transaction scope for a single lifecycle operation.
    async fn begin(&self) -> Result<Self::Transaction, ContentStoreError>;
}

/// Keyed reads and writes scoped to one transaction.
#[async_trait]
pub trait ContentTransaction: Send {
    /// Fetch a question by identifier.
    async fn find_question(
        &mut self,
        id: &QuestionId,
    ) -> Result<Option<Question>, ContentStoreError>;

    /// List every question in store order.
    async fn list_questions(&mut self) -> Result<Vec<Question>, ContentStoreError>;

    /// Insert or replace a question.
    async fn save_question(&mut self, question: &Question) -> Result<(), ContentStoreError>;

    /// Fetch an answer by identifier.
    async fn find_answer(&mut self, id: &AnswerId) -> Result<Option<Answer>, ContentStoreError>;

    /// List the answers whose parent is `question_id`, in store order.
    async fn list_answers_for_question(
        &mut self,
        question_id: &QuestionId,
    ) -> Result<Vec<Answer>, ContentStoreError>;

    /// Insert or replace an answer.
    async fn save_answer(&mut self, answer: &Answer) -> Result<(), ContentStoreError>;

    /// Remove an answer.
    ///
    /// Returns `Ok(true)` if the answer was removed, `Ok(false)` if it did
    /// not exist.
    async fn delete_answer(&mut self, id: &AnswerId) -> Result<bool, ContentStoreError>;

    /// Make the transaction's writes visible to other operations.
    async fn commit(self) -> Result<(), ContentStoreError>;
}
