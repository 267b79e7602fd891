//! Transactional content store kept in process memory.
//!
//! A transaction owns the store lock for its whole lifetime, so transactions
//! run one at a time. Writes apply immediately and are recorded in an undo
//! log. Dropping a transaction without committing replays the log backwards.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::domain::ports::{ContentStore, ContentStoreError, ContentTransaction};
use crate::domain::{Answer, AnswerId, Question, QuestionId};

#[derive(Debug, Clone)]
struct Stored<T> {
    seq: u64,
    value: T,
}

#[derive(Debug, Default)]
struct ContentState {
    next_seq: u64,
    questions: HashMap<QuestionId, Stored<Question>>,
    answers: HashMap<AnswerId, Stored<Answer>>,
}

impl ContentState {
    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

fn in_store_order<T: Clone>(mut rows: Vec<&Stored<T>>) -> Vec<T> {
    rows.sort_by_key(|row| row.seq);
    rows.into_iter().map(|row| row.value.clone()).collect()
}

#[derive(Debug)]
enum Undo {
    Question(QuestionId, Option<Stored<Question>>),
    Answer(AnswerId, Option<Stored<Answer>>),
}

/// Content store holding questions and answers in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    state: Arc<Mutex<ContentState>>,
}

impl InMemoryContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    type Transaction = InMemoryContentTransaction;

    async fn begin(&self) -> Result<Self::Transaction, ContentStoreError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        Ok(InMemoryContentTransaction {
            state: guard,
            undo: Vec::new(),
        })
    }
}

/// Transaction over an [`InMemoryContentStore`].
pub struct InMemoryContentTransaction {
    state: OwnedMutexGuard<ContentState>,
    undo: Vec<Undo>,
}

#[async_trait]
impl ContentTransaction for InMemoryContentTransaction {
    async fn find_question(
        &mut self,
        id: &QuestionId,
    ) -> Result<Option<Question>, ContentStoreError> {
        Ok(self.state.questions.get(id).map(|row| row.value.clone()))
    }

    async fn list_questions(&mut self) -> Result<Vec<Question>, ContentStoreError> {
        Ok(in_store_order(self.state.questions.values().collect()))
    }

    async fn save_question(&mut self, question: &Question) -> Result<(), ContentStoreError> {
        let existing = self.state.questions.get(&question.id).map(|row| row.seq);
        let seq = match existing {
            Some(seq) => seq,
            None => self.state.take_seq(),
        };
        let previous = self.state.questions.insert(
            question.id.clone(),
            Stored {
                seq,
                value: question.clone(),
            },
        );
        self.undo.push(Undo::Question(question.id.clone(), previous));
        Ok(())
    }

    async fn find_answer(&mut self, id: &AnswerId) -> Result<Option<Answer>, ContentStoreError> {
        Ok(self.state.answers.get(id).map(|row| row.value.clone()))
    }

    async fn list_answers_for_question(
        &mut self,
        question_id: &QuestionId,
    ) -> Result<Vec<Answer>, ContentStoreError> {
        Ok(in_store_order(
            self.state
                .answers
                .values()
                .filter(|row| &row.value.question_id == question_id)
                .collect(),
        ))
    }

    async fn save_answer(&mut self, answer: &Answer) -> Result<(), ContentStoreError> {
        let existing = self.state.answers.get(&answer.id).map(|row| row.seq);
        let seq = match existing {
            Some(seq) => seq,
            None => self.state.take_seq(),
        };
        let previous = self.state.answers.insert(
            answer.id.clone(),
            Stored {
                seq,
                value: answer.clone(),
            },
        );
        self.undo.push(Undo::Answer(answer.id.clone(), previous));
        Ok(())
    }

    async fn delete_answer(&mut self, id: &AnswerId) -> Result<bool, ContentStoreError> {
        let Some(previous) = self.state.answers.remove(id) else {
            return Ok(false);
        };
        self.undo.push(Undo::Answer(id.clone(), Some(previous)));
        Ok(true)
    }

    async fn commit(mut self) -> Result<(), ContentStoreError> {
        self.undo.clear();
        Ok(())
    }
}

impl Drop for InMemoryContentTransaction {
    fn drop(&mut self) {
        if self.undo.is_empty() {
            return;
        }
        debug!(writes = self.undo.len(), "rolling back content transaction");
        while let Some(entry) = self.undo.pop() {
            match entry {
                Undo::Question(id, Some(row)) => {
                    self.state.questions.insert(id, row);
                }
                Undo::Question(id, None) => {
                    self.state.questions.remove(&id);
                }
                Undo::Answer(id, Some(row)) => {
                    self.state.answers.insert(id, row);
                }
                Undo::Answer(id, None) => {
                    self.state.answers.remove(&id);
                }
            }
        }
    }
}
