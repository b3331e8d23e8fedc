//! AI task suggestion DTOs and shape validation.
//!
//! The provider's JSON field names (`suggestedSprintNumber`, `storyPoints`,
//! …) are part of the existing contract and preserved via serde renames.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One task suggested by the AI provider for a new project plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub story_points: Option<i32>,
    pub suggested_sprint_number: i32,
    /// Optional subtask titles; absent in most responses.
    #[serde(default)]
    pub subtasks: Vec<String>,
}

impl SuggestedTask {
    /// Defensive re-clamp of the suggested sprint number into
    /// `[1, requested_sprints]`. Upstream is supposed to clamp already, but
    /// the allocator never trusts provider output.
    pub fn clamped_sprint_number(&self, requested_sprints: i32) -> i32 {
        self.suggested_sprint_number.clamp(1, requested_sprints.max(1))
    }
}

/// Minimal shape check on a suggestion batch before allocation proceeds.
///
/// The allocator must never run on a batch it cannot validate: every task
/// needs a non-empty title, and story points (when present) must be
/// positive. An empty batch is valid — it degrades to a single empty
/// sprint downstream.
pub fn validate_suggestions(suggestions: &[SuggestedTask]) -> Result<(), CoreError> {
    for (idx, task) in suggestions.iter().enumerate() {
        if task.title.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "suggestion {idx} has an empty title"
            )));
        }
        if let Some(points) = task.story_points {
            if points <= 0 {
                return Err(CoreError::Validation(format!(
                    "suggestion {idx} has non-positive story points ({points})"
                )));
            }
        }
    }
    Ok(())
}
