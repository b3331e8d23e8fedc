//! The AI suggestion provider capability.
//!
//! Call sites depend on [`AiProvider`] and receive a concrete
//! implementation by injection; nothing downstream knows whether
//! suggestions come from the hosted HTTP service or a test stub. Each
//! gated call site supplies its own typed fallback value, so the provider
//! never needs to guess an "empty" shape.

use async_trait::async_trait;
use serde::Serialize;

use sprintpilot_core::suggestion::SuggestedTask;

use crate::error::AiError;

/// Request payload for a project-level task suggestion call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSuggestionRequest {
    pub project_name: String,
    pub project_description: Option<String>,
    /// How many sprints the plan should target. The provider may undershoot
    /// or overshoot; the allocator re-clamps.
    pub target_sprints: i32,
    pub sprint_duration_weeks: i32,
}

/// Request payload for breaking one task into subtasks.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskSuggestionRequest {
    pub task_title: String,
    pub task_description: Option<String>,
}

/// An external service producing planning suggestions.
///
/// Implementations are treated as opaque, possibly slow, possibly failing
/// dependencies. They must not retry internally — failure handling and
/// quota accounting belong to the gate.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Suggest a task breakdown for a new project.
    async fn suggest_tasks(
        &self,
        request: &TaskSuggestionRequest,
    ) -> Result<Vec<SuggestedTask>, AiError>;

    /// Suggest subtask titles for an existing task.
    async fn suggest_subtasks(
        &self,
        request: &SubtaskSuggestionRequest,
    ) -> Result<Vec<String>, AiError>;
}
