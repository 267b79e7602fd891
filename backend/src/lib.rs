//! Access-controlled question and answer backend.
//!
//! The [`domain`] module holds the entities, the authorization gate and the
//! lifecycle services; [`outbound`] provides in-memory and hashing adapters
//! for its ports. [`config`] and [`telemetry`] carry the process setup shared
//! by the binaries.

pub mod config;
pub mod domain;
pub mod outbound;
pub mod telemetry;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
