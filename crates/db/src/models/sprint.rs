//! Sprint entity model.

use serde::Serialize;
use sqlx::FromRow;
use sprintpilot_core::types::{DbId, Timestamp};

use crate::models::status::StatusId;

/// A sprint row from the `sprints` table.
///
/// `sprint_number` is 1-based and contiguous within a project; the partial
/// unique index on the table guarantees at most one active sprint per
/// project.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sprint {
    pub id: DbId,
    pub project_id: DbId,
    pub sprint_number: i32,
    pub status_id: StatusId,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
