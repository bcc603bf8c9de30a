//! # RMP Dispatch Core
//!
//! The typed-message router and data-assembly core of the Research Match
//! Platform:
//! - Request/response envelope types (`envelope`)
//! - The module router dispatching by request kind (`router`)
//! - Per-module operation dispatchers (`fetch`, `profile`, `project`)
//! - Hierarchy builders assembling nested result trees (`hierarchy`)
//! - The student/project/faculty matching engine (`matching`)
//!
//! The core holds no state of its own; every dispatch is a pure function of
//! the envelope plus the read-only [`rmp_common::EntityStore`] calls it
//! issues, so concurrent dispatches are independently safe.

pub mod envelope;
pub mod error;
pub mod fetch;
pub mod hierarchy;
pub mod matching;
pub mod profile;
pub mod project;
pub mod router;

#[cfg(test)]
pub(crate) mod test_store;

pub use envelope::{ModuleKind, ModuleRequest, ModuleResponse, RequestEnvelope, ResponseEnvelope};
pub use error::DispatchError;
pub use router::{ModuleHandler, ModuleRouter};
