//! Questions, answers, and their identifiers.
//!
//! Identifiers are opaque strings. Fresh ids are random UUIDs, but lookups
//! accept any caller-supplied string so that a malformed id is reported as
//! "not found" rather than as a validation failure.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

macro_rules! define_content_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a caller-supplied identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

define_content_id! {
    /// Identifier of a [`Question`].
    QuestionId
}

define_content_id! {
    /// Identifier of an [`Answer`].
    AnswerId
}

/// A question posted by a signed-in user.
///
/// Only `content` changes after creation; the author owns the question for
/// every mutation.
///
/// # Examples
/// ```
/// # use qna_backend::domain::{Question, UserId};
/// # use chrono::Utc;
/// let author = UserId::random();
/// let question = Question::new(author.clone(), "Why is the sky blue?", Utc::now());
/// assert_eq!(question.author, author);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Question {
    /// Unique identifier.
    pub id: QuestionId,
    /// Question text.
    pub content: String,
    /// The user who posted the question.
    pub author: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Question {
    /// Create a question with a fresh identifier.
    pub fn new(author: UserId, content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: QuestionId::random(),
            content: content.into(),
            author,
            created_at,
        }
    }
}

/// An answer to a [`Question`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Answer {
    /// Unique identifier.
    pub id: AnswerId,
    /// Answer text.
    pub content: String,
    /// The user who posted the answer.
    pub author: UserId,
    /// The question being answered. It existed when the answer was created.
    pub question_id: QuestionId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Answer {
    /// Create an answer to `question` with a fresh identifier.
    pub fn new(
        author: UserId,
        question: &Question,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AnswerId::random(),
            content: content.into(),
            author,
            question_id: question.id.clone(),
            created_at,
        }
    }
}

/// An answer paired with its parent question's text for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerWithQuestion {
    /// The answer itself.
    pub answer: Answer,
    /// Content of the question the answer belongs to.
    pub question_content: String,
}
