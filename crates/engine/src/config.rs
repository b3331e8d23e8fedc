//! Engine configuration loaded from environment variables.

use sprintpilot_ai::HttpAiProvider;
use sprintpilot_core::quota::{QuotaPolicy, FREE_TIER_AI_QUOTA};

use crate::gate::AiGate;

/// Engine configuration loaded from environment variables.
///
/// All fields except `DATABASE_URL` have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Postgres connection string (required).
    pub database_url: String,
    /// Base HTTP URL of the suggestion service.
    pub ai_api_url: String,
    /// Bearer token for the suggestion service.
    pub ai_api_key: String,
    /// Per-request timeout for provider calls in seconds.
    pub ai_timeout_secs: u64,
    /// Quota policy applied by the AI usage gate.
    pub quota: QuotaPolicy,
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                  |
    /// |---------------------------|--------------------------|
    /// | `DATABASE_URL`            | (required)               |
    /// | `AI_API_URL`              | `http://localhost:8787`  |
    /// | `AI_API_KEY`              | (empty)                  |
    /// | `AI_REQUEST_TIMEOUT_SECS` | `30`                     |
    /// | `AI_FREE_TIER_QUOTA`      | `10`                     |
    /// | `AI_CHARGE_FAILED_CALLS`  | `true`                   |
    pub fn from_env() -> Self {
        // Pick up a local .env when present; a missing file is fine.
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let ai_api_url =
            std::env::var("AI_API_URL").unwrap_or_else(|_| "http://localhost:8787".into());

        let ai_api_key = std::env::var("AI_API_KEY").unwrap_or_default();

        let ai_timeout_secs: u64 = std::env::var("AI_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("AI_REQUEST_TIMEOUT_SECS must be a valid u64");

        let limit: i32 = std::env::var("AI_FREE_TIER_QUOTA")
            .unwrap_or_else(|_| FREE_TIER_AI_QUOTA.to_string())
            .parse()
            .expect("AI_FREE_TIER_QUOTA must be a valid i32");

        let charge_failures: bool = std::env::var("AI_CHARGE_FAILED_CALLS")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("AI_CHARGE_FAILED_CALLS must be true or false");

        Self {
            database_url,
            ai_api_url,
            ai_api_key,
            ai_timeout_secs,
            quota: QuotaPolicy {
                limit,
                charge_failures,
            },
        }
    }

    /// Build the HTTP provider described by this configuration.
    pub fn provider(&self) -> HttpAiProvider {
        HttpAiProvider::new(
            self.ai_api_url.clone(),
            self.ai_api_key.clone(),
            self.ai_timeout_secs,
        )
    }

    /// Build the usage gate described by this configuration.
    pub fn gate(&self) -> AiGate {
        AiGate::new(self.quota)
    }
}
