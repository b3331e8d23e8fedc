//! The AI usage gate: tier-based quota enforcement around provider calls.
//!
//! The gate owns two responsibilities and nothing else: deciding whether a
//! gated user may spend one more AI call, and converting provider failures
//! into the call site's typed fallback so they never propagate further.
//! Each call site supplies its own fallback value — the gate never guesses
//! an "empty" shape from the operation.

use std::future::Future;

use sqlx::PgPool;
use sprintpilot_ai::AiError;
use sprintpilot_core::error::CoreError;
use sprintpilot_core::quota::QuotaPolicy;
use sprintpilot_db::models::user::User;
use sprintpilot_db::repositories::UserRepo;

use crate::error::EngineResult;

/// Result of a gated call: the operation's value (or the fallback) plus
/// whether the quota gate refused the invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gated<T> {
    pub value: T,
    /// `true` when the call was denied outright; the UI uses this to show
    /// an upgrade prompt instead of an error.
    pub quota_exceeded: bool,
}

/// Quota gate for AI-backed operations.
#[derive(Debug, Clone, Copy)]
pub struct AiGate {
    policy: QuotaPolicy,
}

impl AiGate {
    pub fn new(policy: QuotaPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> QuotaPolicy {
        self.policy
    }

    /// Run `op` behind the quota gate.
    ///
    /// For gated tiers the check-and-increment is a single atomic UPDATE —
    /// two in-flight calls for the same user cannot both slip under the
    /// limit. A denied call performs zero mutations and never constructs
    /// the operation's side effects (the future is dropped unpolled).
    ///
    /// Provider failures are logged and converted to `fallback`; when the
    /// policy says failures don't count, the reservation is released. A
    /// caller-imposed timeout surfaces as a provider error and takes the
    /// same path, so a cancelled call only consumes quota under the
    /// charge-failures policy.
    pub async fn call<T, Fut>(
        &self,
        pool: &PgPool,
        user: &User,
        fallback: T,
        op: Fut,
    ) -> EngineResult<Gated<T>>
    where
        Fut: Future<Output = Result<T, AiError>>,
    {
        let tier = user.tier().ok_or_else(|| {
            CoreError::Internal(format!(
                "user {} references unknown tier id {}",
                user.id, user.tier_id
            ))
        })?;

        let gated = !tier.is_quota_exempt();
        if gated {
            let reserved =
                UserRepo::try_reserve_ai_call(pool, user.id, self.policy.limit).await?;
            match reserved {
                Some(count) => {
                    tracing::debug!(user_id = user.id, usage = count, "Reserved AI call");
                }
                None => {
                    tracing::info!(user_id = user.id, "AI quota exhausted, call denied");
                    return Ok(Gated {
                        value: fallback,
                        quota_exceeded: true,
                    });
                }
            }
        }

        match op.await {
            Ok(value) => Ok(Gated {
                value,
                quota_exceeded: false,
            }),
            Err(err) => {
                tracing::warn!(
                    user_id = user.id,
                    error = %err,
                    "AI provider call failed, returning fallback"
                );
                if gated && !self.policy.charge_failures {
                    UserRepo::release_ai_call(pool, user.id).await?;
                }
                Ok(Gated {
                    value: fallback,
                    quota_exceeded: false,
                })
            }
        }
    }
}
