//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`ContentStore`], [`PasswordHasher`]) are
//! implemented by outbound adapters. Driving ports ([`QuestionLifecycle`],
//! [`AnswerLifecycle`], [`UserRegistration`]) are implemented by domain
//! services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod answer_lifecycle;
mod content_store;
mod password_hasher;
mod question_lifecycle;
mod session_repository;
mod user_registration;
mod user_repository;

pub use answer_lifecycle::{
    AnswerLifecycle, CreateAnswerRequest, DeleteAnswerRequest, EditAnswerRequest,
    ListAnswersRequest,
};
pub use content_store::{ContentStore, ContentStoreError, ContentTransaction};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordDigest, PasswordHasher, PasswordHasherError};
pub use question_lifecycle::{CreateQuestionRequest, EditQuestionRequest, QuestionLifecycle};
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::{SessionRepository, SessionRepositoryError};
pub use user_registration::{SignupRequest, UserRegistration};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserAccount, UserPersistenceError, UserRepository};
