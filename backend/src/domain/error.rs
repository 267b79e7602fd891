//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses, CLI output, or any other protocol-specific envelope by matching
//! on [`ErrorCode`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable machine-readable error code describing the failure category.
///
/// The access-control kinds are ordered by precedence: session checks run
/// before resource lookups, which run before ownership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The access token does not resolve to any session.
    NotSignedIn,
    /// The session behind the access token has been signed out.
    SignedOut,
    /// The actor is neither the owner nor holds a permitted role.
    NotAuthorized,
    /// The referenced question does not exist.
    QuestionNotFound,
    /// The referenced answer does not exist.
    AnswerNotFound,
    /// Signup rejected because the username is already registered.
    UsernameTaken,
    /// Signup rejected because the email is already registered.
    EmailTaken,
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// A backing store could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

impl ErrorCode {
    /// Stable reference string carried over from the legacy API contract.
    ///
    /// # Examples
    /// ```
    /// use qna_backend::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::SignedOut.reference(), "ATHR-002");
    /// ```
    pub fn reference(self) -> &'static str {
        match self {
            Self::NotSignedIn => "ATHR-001",
            Self::SignedOut => "ATHR-002",
            Self::NotAuthorized => "ATHR-003",
            Self::QuestionNotFound => "QUES-001",
            Self::AnswerNotFound => "ANS-001",
            Self::UsernameTaken => "SGR-001",
            Self::EmailTaken => "SGR-002",
            Self::InvalidRequest => "REQ-001",
            Self::ServiceUnavailable => "SRV-001",
            Self::InternalError => "SRV-002",
        }
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use qna_backend::domain::{Error, ErrorCode};
///
/// let err = Error::new(ErrorCode::AnswerNotFound, "missing");
/// assert_eq!(err.code(), ErrorCode::AnswerNotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    /// The message was blank.
    EmptyMessage,
}

impl std::fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

impl Error {
    /// Create a new error, panicking if validation fails.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use qna_backend::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::question_not_found("gone")
    ///     .with_details(json!({ "questionId": "q-1" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::NotSignedIn`].
    pub fn not_signed_in(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotSignedIn, message)
    }

    /// Convenience constructor for [`ErrorCode::SignedOut`].
    pub fn signed_out(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SignedOut, message)
    }

    /// Convenience constructor for [`ErrorCode::NotAuthorized`].
    pub fn not_authorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotAuthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::QuestionNotFound`].
    pub fn question_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::QuestionNotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::AnswerNotFound`].
    pub fn answer_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AnswerNotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::UsernameTaken`].
    pub fn username_taken(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UsernameTaken, message)
    }

    /// Convenience constructor for [`ErrorCode::EmailTaken`].
    pub fn email_taken(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::EmailTaken, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            message: value.message,
            details: value.details,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            code,
            message,
            details,
        } = value;

        let mut error = Error::try_new(code, message)?;
        error.details = details;
        Ok(error)
    }
}

#[cfg(test)]
mod tests;
