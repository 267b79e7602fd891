//! Domain primitives, access-control rules and lifecycle services.
//!
//! Purpose: define the strongly typed entities shared by every adapter, the
//! authorization gate that guards content, and the services implementing the
//! driving ports. Types document their invariants and serde contracts in
//! their own Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: failure payload and its stable identifier.
//! - User, Role, Session, AccessToken: who is acting and whether they may.
//! - Question, Answer: the content being protected.
//! - AuthorizationGate, authorize_owner_or_role: the two access checks.
//! - QuestionService, AnswerService, UserRegistrationService: use-cases.

pub mod answer_service;
pub mod authorization;
pub mod content;
mod content_errors;
pub mod error;
pub mod ports;
pub mod question_service;
pub mod registration;
pub mod session;
pub mod user;

pub use self::answer_service::AnswerService;
pub use self::authorization::{
    AuthorizationGate, GatedOperation, OWNER_ONLY, OWNER_OR_ADMIN, authorize_owner_or_role,
};
pub use self::content::{Answer, AnswerId, AnswerWithQuestion, Question, QuestionId};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::question_service::QuestionService;
pub use self::registration::{DEFAULT_SIGNUP_PASSWORD, UserRegistrationService};
pub use self::session::{AccessToken, Session};
pub use self::user::{
    EMAIL_MAX, EmailAddress, Role, USERNAME_MAX, USERNAME_MIN, User, UserId, UserValidationError,
    Username,
};
