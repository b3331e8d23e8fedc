//! AI usage quota constants, policy, and pure gating predicates.
//!
//! The actual check-and-increment is a single atomic SQL statement in the
//! repository layer; the functions here only encode the policy so it can be
//! unit tested and reused without a database.

use crate::domain::SubscriptionTier;

// ---------------------------------------------------------------------------
// Quota constants
// ---------------------------------------------------------------------------

/// Lifetime AI call cap for free-tier users. No rolling window or reset.
pub const FREE_TIER_AI_QUOTA: i32 = 10;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Quota enforcement policy for AI-backed operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPolicy {
    /// Maximum number of AI calls for gated (free) tiers.
    pub limit: i32,
    /// Whether a call that was invoked but failed still consumes quota.
    ///
    /// `true` matches the historical behavior: the counter is not rolled
    /// back when the provider errors after being invoked. With `false` the
    /// gate releases the reservation on provider failure, so only returned
    /// results count as usage.
    pub charge_failures: bool,
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            limit: FREE_TIER_AI_QUOTA,
            charge_failures: true,
        }
    }
}

impl QuotaPolicy {
    /// Whether a user at `usage_count` on `tier` must be denied the next
    /// AI call.
    ///
    /// Exempt tiers are never blocked regardless of the counter value.
    pub fn is_blocked(&self, tier: SubscriptionTier, usage_count: i32) -> bool {
        !tier.is_quota_exempt() && usage_count >= self.limit
    }

    /// Remaining calls for a gated user, zero for an exhausted counter.
    /// Exempt tiers report `None` (unlimited).
    pub fn remaining(&self, tier: SubscriptionTier, usage_count: i32) -> Option<i32> {
        if tier.is_quota_exempt() {
            None
        } else {
            Some((self.limit - usage_count).max(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_tier_blocked_at_limit() {
        let policy = QuotaPolicy::default();
        assert!(!policy.is_blocked(SubscriptionTier::Free, 9));
        assert!(policy.is_blocked(SubscriptionTier::Free, 10));
        assert!(policy.is_blocked(SubscriptionTier::Free, 11));
    }

    #[test]
    fn paid_tiers_never_blocked() {
        let policy = QuotaPolicy::default();
        assert!(!policy.is_blocked(SubscriptionTier::Pro, i32::MAX));
        assert!(!policy.is_blocked(SubscriptionTier::Enterprise, i32::MAX));
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        let policy = QuotaPolicy::default();
        assert_eq!(policy.remaining(SubscriptionTier::Free, 0), Some(10));
        assert_eq!(policy.remaining(SubscriptionTier::Free, 7), Some(3));
        assert_eq!(policy.remaining(SubscriptionTier::Free, 12), Some(0));
        assert_eq!(policy.remaining(SubscriptionTier::Pro, 12), None);
    }
}
