//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn ada() -> User {
    User::try_from_strings(VALID_ID, "ada_l", "Ada@Example.org", Role::NonAdmin)
        .expect("fixture user is valid")
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    let err = UserId::new(raw).expect_err("invalid id must fail");
    assert_eq!(err, expected);
}

#[rstest]
#[case("   ", UserValidationError::EmptyUsername)]
#[case("ab", UserValidationError::UsernameTooShort { min: USERNAME_MIN })]
#[case("bad$name", UserValidationError::UsernameInvalidCharacters)]
#[case("has space", UserValidationError::UsernameInvalidCharacters)]
fn username_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    let err = Username::new(raw).expect_err("invalid username must fail");
    assert_eq!(err, expected);
}

#[rstest]
fn username_rejects_overlong_input() {
    let err = Username::new("a".repeat(USERNAME_MAX + 1)).expect_err("too long");
    assert_eq!(err, UserValidationError::UsernameTooLong { max: USERNAME_MAX });
}

#[rstest]
#[case("")]
#[case("no-at-sign")]
#[case("@example.org")]
#[case("ada@")]
#[case("ada@localhost")]
#[case("ada@@example.org")]
#[case("ada lovelace@example.org")]
fn email_rejects_malformed_addresses(#[case] raw: &str) {
    assert!(EmailAddress::new(raw).is_err());
}

#[rstest]
fn email_is_normalised_to_lowercase(ada: User) {
    assert_eq!(ada.email().as_ref(), "ada@example.org");
}

#[rstest]
#[case("admin", Role::Admin)]
#[case("nonadmin", Role::NonAdmin)]
fn role_parses_wire_values(#[case] raw: &str, #[case] expected: Role) {
    let role: Role = raw.parse().expect("known role");
    assert_eq!(role, expected);
    assert_eq!(role.as_str(), raw);
}

#[rstest]
fn role_rejects_unknown_values() {
    let err = "superuser".parse::<Role>().expect_err("unknown role");
    assert_eq!(
        err,
        UserValidationError::UnknownRole {
            role: "superuser".to_owned()
        }
    );
}

#[rstest]
fn user_serialises_with_camel_case_fields(ada: User) {
    let value = serde_json::to_value(&ada).expect("serialise user");
    assert_eq!(
        value,
        json!({
            "id": VALID_ID,
            "username": "ada_l",
            "email": "ada@example.org",
            "role": "nonadmin",
        })
    );
}

#[rstest]
fn user_deserialisation_validates_fields() {
    let payload = json!({
        "id": "nope",
        "username": "ada_l",
        "email": "ada@example.org",
        "role": "admin",
    });
    let result: Result<User, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[rstest]
fn admin_flag_follows_role() {
    let admin = User::try_from_strings(VALID_ID, "root", "root@example.org", Role::Admin)
        .expect("valid admin");
    assert!(admin.is_admin());
}
