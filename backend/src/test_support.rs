//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled when running tests or
//! when the `test-support` feature is enabled.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{AccessToken, EmailAddress, Role, Session, User, UserId, Username};

/// Fixed instant used by [`FixtureClock`].
///
/// # Panics
/// Never in practice; the literal timestamp is valid.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0)
        .single()
        .unwrap_or_else(|| panic!("fixture timestamp must be unambiguous"))
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    /// Freeze the clock at `utc_now`.
    pub fn at(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }
}

impl Default for FixtureClock {
    fn default() -> Self {
        Self::at(fixture_timestamp())
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Build a user with a random id and an `@example.org` address.
///
/// # Panics
/// Panics when `username` violates [`Username`] validation.
pub fn user(username: &str, role: Role) -> User {
    let name = Username::new(username)
        .unwrap_or_else(|err| panic!("fixture username {username:?} is invalid: {err}"));
    let email = EmailAddress::new(format!("{username}@example.org"))
        .unwrap_or_else(|err| panic!("fixture email for {username:?} is invalid: {err}"));
    User::new(UserId::random(), name, email, role)
}

/// Build an active session for `user` with the given token.
pub fn active_session(token: &str, user: User) -> Session {
    Session::open(AccessToken::new(token), user, fixture_timestamp())
}

/// Build a signed-out session for `user` with the given token.
pub fn signed_out_session(token: &str, user: User) -> Session {
    let mut session = active_session(token, user);
    session.close(fixture_timestamp() + chrono::Duration::minutes(30));
    session
}
