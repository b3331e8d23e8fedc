//! Pure domain logic for the sprintpilot coaching engine.
//!
//! This crate has zero internal dependencies so the same types and rules can
//! be used by the persistence layer, the AI boundary, and any future worker
//! or CLI tooling. Everything here is synchronous and deterministic: the
//! allocator and the badge evaluator are pure functions over plain data, and
//! nothing reads the wall clock.

pub mod allocation;
pub mod badges;
pub mod domain;
pub mod error;
pub mod quota;
pub mod snapshot;
pub mod suggestion;
pub mod types;

pub use error::CoreError;
