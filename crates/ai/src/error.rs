//! Errors from the AI suggestion provider layer.

/// Errors from an AI provider call.
///
/// These never cross the gate boundary as exceptions — the gate converts
/// them into the call site's typed fallback value.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("AI provider error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider responded 2xx but the payload failed the shape check.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}
