//! AI suggestion provider boundary.
//!
//! Exposes the [`provider::AiProvider`] capability trait plus the
//! reqwest-backed [`http::HttpAiProvider`] implementation. The provider is
//! an opaque external dependency: it may be slow, it may fail, and its
//! failures are recovered at the gate boundary, never propagated further.

pub mod error;
pub mod http;
pub mod provider;

pub use error::AiError;
pub use http::HttpAiProvider;
pub use provider::{AiProvider, SubtaskSuggestionRequest, TaskSuggestionRequest};
