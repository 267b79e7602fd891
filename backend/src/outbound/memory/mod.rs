//! In-process adapters for the session, content and user ports.
//!
//! These back the `replay-ops` binary and the integration tests. State lives
//! behind mutexes and is lost when the adapter is dropped.

mod content;
mod sessions;
mod users;

pub use content::{InMemoryContentStore, InMemoryContentTransaction};
pub use sessions::InMemorySessionRepository;
pub use users::InMemoryUserRepository;
