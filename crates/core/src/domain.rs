//! Domain vocabulary shared across the workspace.
//!
//! This module lives in `core` (zero internal deps) so the same enums can
//! be used by the persistence layer, the AI boundary, and any future worker
//! or CLI tooling. Wire values are snake_case to preserve the existing JSON
//! contract.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Subscription tiers
// ---------------------------------------------------------------------------

/// Subscription tier of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Free,
    Pro,
    Enterprise,
}

impl SubscriptionTier {
    /// Whether this tier bypasses the AI usage quota entirely.
    ///
    /// The usage counter may still be tracked for exempt tiers, but it must
    /// never block an invocation.
    pub fn is_quota_exempt(self) -> bool {
        !matches!(self, Self::Free)
    }
}

// ---------------------------------------------------------------------------
// Project lifecycle
// ---------------------------------------------------------------------------

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    Paused,
    Completed,
}

// ---------------------------------------------------------------------------
// Sprint lifecycle
// ---------------------------------------------------------------------------

/// Sprint lifecycle status.
///
/// At most one sprint is `Active` at a time within a project. Sprint 1
/// starts `Active`; all later sprints start `Planning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprintStatus {
    Planning,
    Active,
    Completed,
}

// ---------------------------------------------------------------------------
// Task workflow
// ---------------------------------------------------------------------------

/// Task workflow status.
///
/// The variants form an ordered workflow, but any-to-any transitions are
/// permitted; `completed_at` is stamped on the first transition into `Done`
/// and never cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Backlog,
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    /// Whether this status counts as completed work.
    pub fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}
