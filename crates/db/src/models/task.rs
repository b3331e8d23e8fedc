//! Task, subtask, and status-history models and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sprintpilot_core::types::{DbId, Timestamp};

use crate::models::status::StatusId;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub sprint_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub story_points: Option<i32>,
    pub status_id: StatusId,
    pub planned_date: Option<NaiveDate>,
    /// Stamped on the first transition into Done, never cleared.
    pub completed_at: Option<Timestamp>,
    pub created_by: DbId,
    pub is_ai_assisted: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A subtask row from the `subtasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subtask {
    pub id: DbId,
    pub task_id: DbId,
    pub title: String,
    pub is_done: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the append-only `task_status_history` log.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskStatusHistory {
    pub id: DbId,
    pub task_id: DbId,
    pub from_status_id: Option<StatusId>,
    pub to_status_id: StatusId,
    pub changed_at: Timestamp,
}

/// DTO for manually creating a task inside a sprint.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub sprint_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub story_points: Option<i32>,
    pub planned_date: Option<NaiveDate>,
}
