//! Tests for the answer lifecycle service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{CreateQuestionRequest, QuestionLifecycle};
use crate::domain::{AccessToken, ErrorCode, Question, QuestionService, Role, User};
use crate::outbound::memory::{InMemoryContentStore, InMemorySessionRepository};
use crate::test_support::{FixtureClock, fixture_timestamp, user};

struct Harness {
    sessions: Arc<InMemorySessionRepository>,
    content: Arc<InMemoryContentStore>,
    questions: QuestionService<InMemorySessionRepository, InMemoryContentStore>,
    answers: AnswerService<InMemorySessionRepository, InMemoryContentStore>,
}

impl Harness {
    fn sign_in(&self, user: User) -> AccessToken {
        self.sessions.open_session(user).expect("open session")
    }

    async fn ask(&self, token: &AccessToken, content: &str) -> Question {
        self.questions
            .create_question(CreateQuestionRequest {
                token: token.clone(),
                content: content.to_owned(),
            })
            .await
            .expect("create question")
    }

    async fn answer(
        &self,
        token: &AccessToken,
        question_id: &QuestionId,
        content: &str,
    ) -> Result<Answer, Error> {
        self.answers
            .create_answer(CreateAnswerRequest {
                token: token.clone(),
                question_id: question_id.clone(),
                content: content.to_owned(),
            })
            .await
    }

    async fn delete(&self, token: &AccessToken, answer_id: &AnswerId) -> Result<(), Error> {
        self.answers
            .delete_answer(DeleteAnswerRequest {
                token: token.clone(),
                answer_id: answer_id.clone(),
            })
            .await
    }

    async fn list(
        &self,
        token: &AccessToken,
        question_id: &QuestionId,
    ) -> Result<Vec<AnswerWithQuestion>, Error> {
        self.answers
            .list_answers(ListAnswersRequest {
                token: token.clone(),
                question_id: question_id.clone(),
            })
            .await
    }
}

#[fixture]
fn harness() -> Harness {
    let clock: Arc<dyn Clock> = Arc::new(FixtureClock::default());
    let sessions = Arc::new(InMemorySessionRepository::new(Arc::clone(&clock)));
    let gate = AuthorizationGate::new(Arc::clone(&sessions));
    let content = Arc::new(InMemoryContentStore::new());
    Harness {
        questions: QuestionService::new(gate.clone(), Arc::clone(&content), Arc::clone(&clock)),
        answers: AnswerService::new(gate, Arc::clone(&content), clock),
        sessions,
        content,
    }
}

#[rstest]
#[tokio::test]
async fn answer_links_question_and_author(harness: Harness) {
    let asker = harness.sign_in(user("ada", Role::NonAdmin));
    let question = harness.ask(&asker, "What is a lifetime?").await;
    let responder = user("grace", Role::NonAdmin);
    let token = harness.sign_in(responder.clone());

    let answer = harness
        .answer(&token, &question.id, "A scope")
        .await
        .expect("create answer");

    assert_eq!(answer.question_id, question.id);
    assert_eq!(&answer.author, responder.id());
    assert_eq!(answer.created_at, fixture_timestamp());
}

#[rstest]
#[tokio::test]
async fn answering_missing_question_is_not_found(harness: Harness) {
    let token = harness.sign_in(user("ada", Role::NonAdmin));

    let error = harness
        .answer(&token, &QuestionId::new("nonexistent-id"), "orphan")
        .await
        .expect_err("missing question");

    assert_eq!(error.code(), ErrorCode::QuestionNotFound);
    assert_eq!(error.message(), "The question entered is invalid");
}

#[rstest]
#[tokio::test]
async fn only_author_edits_answer(harness: Harness) {
    let owner = harness.sign_in(user("ada", Role::NonAdmin));
    let question = harness.ask(&owner, "Q").await;
    let answer = harness
        .answer(&owner, &question.id, "first take")
        .await
        .expect("create answer");
    let admin = harness.sign_in(user("root", Role::Admin));

    let denied = harness
        .answers
        .edit_answer(EditAnswerRequest {
            token: admin,
            answer_id: answer.id.clone(),
            content: "admin rewrite".to_owned(),
        })
        .await
        .expect_err("admin cannot edit");
    assert_eq!(denied.code(), ErrorCode::NotAuthorized);
    assert_eq!(denied.message(), "Only the answer owner can edit the answer");

    let edited = harness
        .answers
        .edit_answer(EditAnswerRequest {
            token: owner.clone(),
            answer_id: answer.id.clone(),
            content: "second take".to_owned(),
        })
        .await
        .expect("owner edit");
    assert_eq!(edited.content, "second take");
    assert_eq!(edited.question_id, answer.question_id);
}

#[rstest]
#[tokio::test]
async fn editing_missing_answer_is_not_found(harness: Harness) {
    let token = harness.sign_in(user("ada", Role::NonAdmin));

    let error = harness
        .answers
        .edit_answer(EditAnswerRequest {
            token,
            answer_id: AnswerId::new("nonexistent-id"),
            content: "text".to_owned(),
        })
        .await
        .expect_err("missing answer");

    assert_eq!(error.code(), ErrorCode::AnswerNotFound);
    assert_eq!(error.message(), "Entered answer uuid does not exist");
}

#[rstest]
#[case(Role::Admin, true)]
#[case(Role::NonAdmin, false)]
#[tokio::test]
async fn non_owner_delete_requires_admin(
    harness: Harness,
    #[case] role: Role,
    #[case] permitted: bool,
) {
    let owner = harness.sign_in(user("ada", Role::NonAdmin));
    let question = harness.ask(&owner, "Q").await;
    let answer = harness
        .answer(&owner, &question.id, "A")
        .await
        .expect("create answer");
    let other = harness.sign_in(user("grace", role));

    let result = harness.delete(&other, &answer.id).await;

    let remaining = harness.list(&owner, &question.id).await.expect("list");
    if permitted {
        assert!(result.is_ok());
        assert!(remaining.is_empty());
    } else {
        let error = result.expect_err("non-admin denied");
        assert_eq!(error.code(), ErrorCode::NotAuthorized);
        assert_eq!(
            error.message(),
            "Only the answer owner or admin can delete the answer"
        );
        assert_eq!(remaining.len(), 1);
    }
}

#[rstest]
#[tokio::test]
async fn deleted_answer_is_gone(harness: Harness) {
    let owner = harness.sign_in(user("ada", Role::NonAdmin));
    let question = harness.ask(&owner, "Q").await;
    let answer = harness
        .answer(&owner, &question.id, "A")
        .await
        .expect("create answer");

    harness.delete(&owner, &answer.id).await.expect("delete");
    let error = harness
        .delete(&owner, &answer.id)
        .await
        .expect_err("already deleted");

    assert_eq!(error.code(), ErrorCode::AnswerNotFound);
}

#[rstest]
#[tokio::test]
async fn listing_pairs_answers_with_question_text(harness: Harness) {
    let ada = harness.sign_in(user("ada", Role::NonAdmin));
    let asked = harness.ask(&ada, "Why Rust?").await;
    let other = harness.ask(&ada, "Why not?").await;
    for (question, content) in [(&asked, "speed"), (&other, "noise"), (&asked, "safety")] {
        harness
            .answer(&ada, &question.id, content)
            .await
            .expect("create answer");
    }

    let listed = harness.list(&ada, &asked.id).await.expect("list");

    let pairs: Vec<_> = listed
        .iter()
        .map(|entry| (entry.answer.content.as_str(), entry.question_content.as_str()))
        .collect();
    assert_eq!(pairs, vec![("speed", "Why Rust?"), ("safety", "Why Rust?")]);
}

#[rstest]
#[tokio::test]
async fn listing_missing_question_is_not_found(harness: Harness) {
    let token = harness.sign_in(user("ada", Role::NonAdmin));

    let error = harness
        .list(&token, &QuestionId::new("nonexistent-id"))
        .await
        .expect_err("missing question");

    assert_eq!(error.code(), ErrorCode::QuestionNotFound);
    assert_eq!(
        error.message(),
        "The question with entered uuid whose details are to be seen does not exist"
    );
}

#[rstest]
#[tokio::test]
async fn signed_out_delete_wins_over_missing_answer(harness: Harness) {
    let token = harness.sign_in(user("root", Role::Admin));
    harness.sessions.sign_out(&token).expect("sign out");

    let error = harness
        .delete(&token, &AnswerId::new("nonexistent-id"))
        .await
        .expect_err("signed out");

    assert_eq!(error.code(), ErrorCode::SignedOut);
    assert_eq!(
        error.message(),
        "User is signed out. Sign in first to delete an answer"
    );
}

#[rstest]
#[tokio::test]
async fn sign_out_while_waiting_for_the_store_refuses_the_edit(harness: Harness) {
    let owner = harness.sign_in(user("ada", Role::NonAdmin));
    let question = harness.ask(&owner, "Q").await;
    let answer = harness
        .answer(&owner, &question.id, "before")
        .await
        .expect("create answer");

    let held = harness.content.begin().await.expect("hold the store");
    let answers = harness.answers.clone();
    let request = EditAnswerRequest {
        token: owner.clone(),
        answer_id: answer.id.clone(),
        content: "after-signout".to_owned(),
    };
    let pending = tokio::spawn(async move { answers.edit_answer(request).await });
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
    harness.sessions.sign_out(&owner).expect("sign out");
    drop(held);

    let error = pending
        .await
        .expect("edit task completes")
        .expect_err("session closed before the edit ran");
    assert_eq!(error.code(), ErrorCode::SignedOut);

    let reader = harness.sign_in(user("grace", Role::NonAdmin));
    let listed = harness.list(&reader, &question.id).await.expect("list");
    let contents: Vec<_> = listed.iter().map(|e| e.answer.content.as_str()).collect();
    assert_eq!(contents, vec!["before"]);
}
