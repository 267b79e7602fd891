//! Replay a scripted sequence of sign-ins and content operations against the
//! in-memory adapters, printing one JSON line per step.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use color_eyre::eyre::{Context, Result, eyre};
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::runtime::Builder;
use tracing::info;

use qna_backend::config::AppSettings;
use qna_backend::domain::ports::{
    AnswerLifecycle, CreateAnswerRequest, CreateQuestionRequest, DeleteAnswerRequest,
    EditAnswerRequest, EditQuestionRequest, ListAnswersRequest, QuestionLifecycle, SignupRequest,
    UserRegistration, UserRepository,
};
use qna_backend::domain::{
    AccessToken, AnswerId, AnswerService, AuthorizationGate, Error, QuestionId, QuestionService,
    Role, Session, UserRegistrationService, Username,
};
use qna_backend::outbound::crypto::Sha256PasswordHasher;
use qna_backend::outbound::memory::{
    InMemoryContentStore, InMemorySessionRepository, InMemoryUserRepository,
};
use qna_backend::telemetry::init_tracing;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct Script {
    #[serde(default)]
    users: Vec<ScriptUser>,
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ScriptUser {
    username: String,
    email: String,
    #[serde(default)]
    role: Role,
    password: Option<String>,
}

/// One scripted action. `question` and `answer` accept either a label bound
/// by an earlier create step or a literal identifier.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
enum Step {
    SignIn {
        username: String,
        token: String,
    },
    SignOut {
        token: String,
    },
    CreateQuestion {
        token: String,
        content: String,
        label: Option<String>,
    },
    ListQuestions {
        token: String,
    },
    EditQuestion {
        token: String,
        question: String,
        content: String,
    },
    CreateAnswer {
        token: String,
        question: String,
        content: String,
        label: Option<String>,
    },
    EditAnswer {
        token: String,
        answer: String,
        content: String,
    },
    DeleteAnswer {
        token: String,
        answer: String,
    },
    ListAnswers {
        token: String,
        question: String,
    },
}

impl Step {
    fn name(&self) -> &'static str {
        match self {
            Self::SignIn { .. } => "signIn",
            Self::SignOut { .. } => "signOut",
            Self::CreateQuestion { .. } => "createQuestion",
            Self::ListQuestions { .. } => "listQuestions",
            Self::EditQuestion { .. } => "editQuestion",
            Self::CreateAnswer { .. } => "createAnswer",
            Self::EditAnswer { .. } => "editAnswer",
            Self::DeleteAnswer { .. } => "deleteAnswer",
            Self::ListAnswers { .. } => "listAnswers",
        }
    }
}

fn parse_script(raw: &str) -> Result<Script> {
    serde_json::from_str(raw).wrap_err("parse replay script")
}

fn error_json(error: &Error) -> Value {
    json!({
        "code": error.code(),
        "reference": error.code().reference(),
        "message": error.message(),
    })
}

struct Replay {
    clock: Arc<dyn Clock>,
    users: Arc<InMemoryUserRepository>,
    sessions: Arc<InMemorySessionRepository>,
    registration: UserRegistrationService<InMemoryUserRepository, Sha256PasswordHasher>,
    questions: QuestionService<InMemorySessionRepository, InMemoryContentStore>,
    answers: AnswerService<InMemorySessionRepository, InMemoryContentStore>,
    question_labels: HashMap<String, QuestionId>,
    answer_labels: HashMap<String, AnswerId>,
}

impl Replay {
    fn new(settings: &AppSettings) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let users = Arc::new(InMemoryUserRepository::new());
        let sessions = Arc::new(InMemorySessionRepository::new(Arc::clone(&clock)));
        let content = Arc::new(InMemoryContentStore::new());
        let gate = AuthorizationGate::new(Arc::clone(&sessions));
        Self {
            registration: UserRegistrationService::new(
                Arc::clone(&users),
                Arc::new(Sha256PasswordHasher),
            )
            .with_default_password(settings.default_password()),
            questions: QuestionService::new(
                gate.clone(),
                Arc::clone(&content),
                Arc::clone(&clock),
            ),
            answers: AnswerService::new(gate, content, Arc::clone(&clock)),
            clock,
            users,
            sessions,
            question_labels: HashMap::new(),
            answer_labels: HashMap::new(),
        }
    }

    async fn register(&self, user: ScriptUser) -> Result<Value, Error> {
        let mut request = SignupRequest::new(user.username, user.email).with_role(user.role);
        if let Some(password) = user.password {
            request = request.with_password(password);
        }
        let registered = self.registration.register(request).await?;
        Ok(json!(registered))
    }

    fn question_id(&self, reference: &str) -> QuestionId {
        self.question_labels
            .get(reference)
            .cloned()
            .unwrap_or_else(|| QuestionId::new(reference))
    }

    fn answer_id(&self, reference: &str) -> AnswerId {
        self.answer_labels
            .get(reference)
            .cloned()
            .unwrap_or_else(|| AnswerId::new(reference))
    }

    async fn sign_in(&self, username: &str, token: String) -> Result<Value, Error> {
        let username = Username::new(username)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let account = self
            .users
            .find_by_username(&username)
            .await
            .map_err(|err| Error::internal(err.to_string()))?
            .ok_or_else(|| Error::invalid_request(format!("unknown user {username}")))?;
        let session = Session::open(AccessToken::new(token), account.user, self.clock.utc());
        self.sessions
            .insert(session)
            .map_err(|err| Error::internal(err.to_string()))?;
        Ok(json!({ "signedIn": username }))
    }

    async fn run(&mut self, step: Step) -> Result<Value, Error> {
        match step {
            Step::SignIn { username, token } => self.sign_in(&username, token).await,
            Step::SignOut { token } => {
                let closed = self
                    .sessions
                    .sign_out(&AccessToken::new(token))
                    .map_err(|err| Error::internal(err.to_string()))?;
                Ok(json!({ "signedOut": closed }))
            }
            Step::CreateQuestion {
                token,
                content,
                label,
            } => {
                let question = self
                    .questions
                    .create_question(CreateQuestionRequest {
                        token: AccessToken::new(token),
                        content,
                    })
                    .await?;
                if let Some(label) = label {
                    self.question_labels.insert(label, question.id.clone());
                }
                Ok(json!(question))
            }
            Step::ListQuestions { token } => {
                let questions = self
                    .questions
                    .list_questions(&AccessToken::new(token))
                    .await?;
                Ok(json!(questions))
            }
            Step::EditQuestion {
                token,
                question,
                content,
            } => {
                let question_id = self.question_id(&question);
                let edited = self
                    .questions
                    .edit_question(EditQuestionRequest {
                        token: AccessToken::new(token),
                        question_id,
                        content,
                    })
                    .await?;
                Ok(json!(edited))
            }
            Step::CreateAnswer {
                token,
                question,
                content,
                label,
            } => {
                let question_id = self.question_id(&question);
                let answer = self
                    .answers
                    .create_answer(CreateAnswerRequest {
                        token: AccessToken::new(token),
                        question_id,
                        content,
                    })
                    .await?;
                if let Some(label) = label {
                    self.answer_labels.insert(label, answer.id.clone());
                }
                Ok(json!(answer))
            }
            Step::EditAnswer {
                token,
                answer,
                content,
            } => {
                let answer_id = self.answer_id(&answer);
                let edited = self
                    .answers
                    .edit_answer(EditAnswerRequest {
                        token: AccessToken::new(token),
                        answer_id,
                        content,
                    })
                    .await?;
                Ok(json!(edited))
            }
            Step::DeleteAnswer { token, answer } => {
                let answer_id = self.answer_id(&answer);
                self.answers
                    .delete_answer(DeleteAnswerRequest {
                        token: AccessToken::new(token),
                        answer_id: answer_id.clone(),
                    })
                    .await?;
                Ok(json!({ "deleted": answer_id }))
            }
            Step::ListAnswers { token, question } => {
                let question_id = self.question_id(&question);
                let answers = self
                    .answers
                    .list_answers(ListAnswersRequest {
                        token: AccessToken::new(token),
                        question_id,
                    })
                    .await?;
                Ok(json!(answers))
            }
        }
    }
}

fn outcome_line(index: usize, op: &str, outcome: Result<Value, Error>) -> Value {
    match outcome {
        Ok(value) => json!({ "step": index, "op": op, "ok": value }),
        Err(error) => json!({ "step": index, "op": op, "error": error_json(&error) }),
    }
}

async fn replay(settings: &AppSettings, script: Script) -> Vec<Value> {
    let mut replay = Replay::new(settings);
    let mut lines = Vec::with_capacity(script.users.len() + script.steps.len());

    for user in script.users {
        let outcome = replay.register(user).await;
        lines.push(outcome_line(lines.len(), "signUp", outcome));
    }
    for step in script.steps {
        let op = step.name();
        let outcome = replay.run(step).await;
        lines.push(outcome_line(lines.len(), op, outcome));
    }
    lines
}

fn script_path(settings: &AppSettings) -> Result<&Path> {
    settings.replay_script().ok_or_else(|| {
        eyre!("no replay script given; pass --replay-script or set QNA_REPLAY_SCRIPT")
    })
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = AppSettings::load().map_err(|err| eyre!("load settings: {err}"))?;
    init_tracing(&settings);

    let path = script_path(&settings)?;
    let raw =
        fs::read_to_string(path).wrap_err_with(|| format!("read script {}", path.display()))?;
    let script = parse_script(&raw)?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    let lines = runtime.block_on(replay(&settings, script));
    info!(steps = lines.len(), "replay finished");

    for line in lines {
        println!("{line}");
    }
    Ok(())
}
