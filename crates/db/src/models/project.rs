//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sprintpilot_core::types::{DbId, Timestamp};

use crate::models::sprint::Sprint;
use crate::models::status::StatusId;
use crate::models::task::{Subtask, Task};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status_id: StatusId,
    pub sprint_duration_weeks: i16,
    pub total_sprints: i32,
    pub estimated_completion_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project shell (sprints come from the allocator).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub sprint_duration_weeks: i16,
}

/// A freshly persisted project with its full sprint/task tree, returned
/// from plan creation so callers don't re-read what they just wrote.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectAggregate {
    pub project: Project,
    pub sprints: Vec<SprintAggregate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SprintAggregate {
    pub sprint: Sprint,
    pub tasks: Vec<TaskAggregate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskAggregate {
    pub task: Task,
    pub subtasks: Vec<Subtask>,
}
