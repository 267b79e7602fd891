//! Tests for the domain error payload and its stable codes.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn base_error() -> Error {
    Error::not_authorized("Only the answer owner can edit the answer")
}

#[rstest]
fn not_authorized_constructor_sets_code(base_error: Error) {
    assert_eq!(base_error.code(), ErrorCode::NotAuthorized);
    assert_eq!(
        base_error.message(),
        "Only the answer owner can edit the answer"
    );
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
#[should_panic(expected = "error messages must satisfy validation")]
fn new_panics_on_blank_message() {
    let _ = Error::new(ErrorCode::InternalError, "");
}

#[rstest]
#[case(ErrorCode::NotSignedIn, "ATHR-001")]
#[case(ErrorCode::SignedOut, "ATHR-002")]
#[case(ErrorCode::NotAuthorized, "ATHR-003")]
#[case(ErrorCode::QuestionNotFound, "QUES-001")]
#[case(ErrorCode::AnswerNotFound, "ANS-001")]
#[case(ErrorCode::UsernameTaken, "SGR-001")]
#[case(ErrorCode::EmailTaken, "SGR-002")]
fn legacy_references_are_stable(#[case] code: ErrorCode, #[case] expected: &str) {
    assert_eq!(code.reference(), expected);
}

#[rstest]
fn serialises_code_as_snake_case(base_error: Error) {
    let value = serde_json::to_value(&base_error).expect("serialise error");
    assert_eq!(value["code"], json!("not_authorized"));
    assert!(value.get("details").is_none());
}

#[rstest]
fn deserialisation_rejects_blank_message() {
    let payload = json!({ "code": "signed_out", "message": " " });
    let result: Result<Error, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[rstest]
fn details_survive_serialisation() {
    let error = Error::answer_not_found("Entered answer uuid does not exist")
        .with_details(json!({ "answerId": "a-1" }));
    let value = serde_json::to_value(&error).expect("serialise error");
    let restored: Error = serde_json::from_value(value).expect("deserialise error");
    assert_eq!(restored, error);
    assert_eq!(restored.details(), Some(&json!({ "answerId": "a-1" })));
}

#[rstest]
fn display_uses_message() {
    let error = Error::signed_out("User is signed out");
    assert_eq!(error.to_string(), "User is signed out");
}
