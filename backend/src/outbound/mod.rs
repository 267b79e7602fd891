//! Outbound adapters implementing domain ports.
//!
//! - **memory**: in-process session, content and user stores
//! - **crypto**: password hashing
//!
//! Adapters translate between domain types and their storage representation
//! and contain no access-control logic.

pub mod crypto;
pub mod memory;
