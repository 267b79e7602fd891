//! Tests for the question lifecycle service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::ContentStoreError;
use crate::domain::{ErrorCode, QuestionId, Role, User};
use crate::outbound::memory::{
    InMemoryContentStore, InMemoryContentTransaction, InMemorySessionRepository,
};
use crate::test_support::{FixtureClock, fixture_timestamp, user};

struct Harness {
    sessions: Arc<InMemorySessionRepository>,
    service: QuestionService<InMemorySessionRepository, InMemoryContentStore>,
}

impl Harness {
    fn sign_in(&self, user: User) -> AccessToken {
        self.sessions.open_session(user).expect("open session")
    }

    async fn post(&self, token: &AccessToken, content: &str) -> Question {
        self.service
            .create_question(CreateQuestionRequest {
                token: token.clone(),
                content: content.to_owned(),
            })
            .await
            .expect("create question")
    }

    async fn edit(
        &self,
        token: &AccessToken,
        question_id: &QuestionId,
        content: &str,
    ) -> Result<Question, Error> {
        self.service
            .edit_question(EditQuestionRequest {
                token: token.clone(),
                question_id: question_id.clone(),
                content: content.to_owned(),
            })
            .await
    }

    async fn contents(&self, token: &AccessToken) -> Vec<String> {
        self.service
            .list_questions(token)
            .await
            .expect("list questions")
            .into_iter()
            .map(|q| q.content)
            .collect()
    }
}

#[fixture]
fn harness() -> Harness {
    let clock: Arc<dyn Clock> = Arc::new(FixtureClock::default());
    let sessions = Arc::new(InMemorySessionRepository::new(Arc::clone(&clock)));
    let gate = AuthorizationGate::new(Arc::clone(&sessions));
    let service = QuestionService::new(gate, Arc::new(InMemoryContentStore::new()), clock);
    Harness { sessions, service }
}

#[rstest]
#[tokio::test]
async fn create_records_author_and_clock_time(harness: Harness) {
    let author = user("ada", Role::NonAdmin);
    let token = harness.sign_in(author.clone());

    let question = harness.post(&token, "What is ownership?").await;

    assert_eq!(&question.author, author.id());
    assert_eq!(question.created_at, fixture_timestamp());
    assert_eq!(harness.contents(&token).await, vec!["What is ownership?"]);
}

#[rstest]
#[tokio::test]
async fn signed_out_user_cannot_post(harness: Harness) {
    let token = harness.sign_in(user("ada", Role::NonAdmin));
    let reader = harness.sign_in(user("grace", Role::NonAdmin));
    harness.sessions.sign_out(&token).expect("sign out");

    let error = harness
        .service
        .create_question(CreateQuestionRequest {
            token,
            content: "too late".to_owned(),
        })
        .await
        .expect_err("signed out");

    assert_eq!(error.code(), ErrorCode::SignedOut);
    assert_eq!(
        error.message(),
        "User is signed out. Sign in first to post a question"
    );
    assert!(harness.contents(&reader).await.is_empty());
}

#[rstest]
#[tokio::test]
async fn any_signed_in_user_lists_all_questions_in_order(harness: Harness) {
    let ada = harness.sign_in(user("ada", Role::NonAdmin));
    let grace = harness.sign_in(user("grace", Role::Admin));
    harness.post(&ada, "first").await;
    harness.post(&grace, "second").await;

    let reader = harness.sign_in(user("linus", Role::NonAdmin));

    assert_eq!(harness.contents(&reader).await, vec!["first", "second"]);
}

#[rstest]
#[tokio::test]
async fn unknown_token_cannot_list(harness: Harness) {
    let error = harness
        .service
        .list_questions(&AccessToken::new("never-issued"))
        .await
        .expect_err("unknown token");

    assert_eq!(error.code(), ErrorCode::NotSignedIn);
}

#[rstest]
#[tokio::test]
async fn owner_edits_content_only(harness: Harness) {
    let token = harness.sign_in(user("ada", Role::NonAdmin));
    let original = harness.post(&token, "draft").await;

    let edited = harness
        .edit(&token, &original.id, "final")
        .await
        .expect("owner edit");

    assert_eq!(edited.id, original.id);
    assert_eq!(edited.author, original.author);
    assert_eq!(edited.created_at, original.created_at);
    assert_eq!(edited.content, "final");
    assert_eq!(harness.contents(&token).await, vec!["final"]);
}

#[rstest]
#[case(Role::NonAdmin)]
#[case(Role::Admin)]
#[tokio::test]
async fn non_owner_cannot_edit(harness: Harness, #[case] role: Role) {
    let owner = harness.sign_in(user("ada", Role::NonAdmin));
    let question = harness.post(&owner, "mine").await;
    let other = harness.sign_in(user("grace", role));

    let error = harness
        .edit(&other, &question.id, "hijacked")
        .await
        .expect_err("non-owner edit");

    assert_eq!(error.code(), ErrorCode::NotAuthorized);
    assert_eq!(
        error.message(),
        "Only the question owner can edit the question"
    );
    assert_eq!(harness.contents(&owner).await, vec!["mine"]);
}

#[rstest]
#[tokio::test]
async fn editing_missing_question_is_not_found(harness: Harness) {
    let token = harness.sign_in(user("ada", Role::NonAdmin));

    let error = harness
        .edit(&token, &QuestionId::new("nonexistent-id"), "text")
        .await
        .expect_err("missing question");

    assert_eq!(error.code(), ErrorCode::QuestionNotFound);
    assert_eq!(error.message(), "Entered question uuid does not exist");
}

#[rstest]
#[tokio::test]
async fn session_failure_wins_over_missing_question(harness: Harness) {
    let token = harness.sign_in(user("ada", Role::NonAdmin));
    harness.sessions.sign_out(&token).expect("sign out");

    let error = harness
        .edit(&token, &QuestionId::new("nonexistent-id"), "text")
        .await
        .expect_err("signed out");

    assert_eq!(error.code(), ErrorCode::SignedOut);
}

struct UnavailableStore(ContentStoreError);

#[async_trait]
impl ContentStore for UnavailableStore {
    type Transaction = InMemoryContentTransaction;

    async fn begin(&self) -> Result<Self::Transaction, ContentStoreError> {
        Err(self.0.clone())
    }
}

#[rstest]
#[case(ContentStoreError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(ContentStoreError::query("corrupt"), ErrorCode::InternalError)]
#[tokio::test]
async fn store_failures_are_mapped(#[case] failure: ContentStoreError, #[case] expected: ErrorCode) {
    let clock: Arc<dyn Clock> = Arc::new(FixtureClock::default());
    let sessions = Arc::new(InMemorySessionRepository::new(Arc::clone(&clock)));
    let token = sessions
        .open_session(user("ada", Role::NonAdmin))
        .expect("open session");
    let service = QuestionService::new(
        AuthorizationGate::new(sessions),
        Arc::new(UnavailableStore(failure)),
        clock,
    );

    let error = service
        .list_questions(&token)
        .await
        .expect_err("store failure");

    assert_eq!(error.code(), expected);
}
