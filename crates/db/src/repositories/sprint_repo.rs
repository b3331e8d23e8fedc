//! Repository for the `sprints` table.

use sqlx::{PgConnection, PgPool};
use sprintpilot_core::domain::SprintStatus;
use sprintpilot_core::types::DbId;

use crate::models::sprint::Sprint;
use crate::models::status::StatusLookup;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, sprint_number, status_id, start_date, end_date, \
                        created_at, updated_at";

/// Provides operations for sprints.
pub struct SprintRepo;

impl SprintRepo {
    /// Find a sprint by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sprint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sprints WHERE id = $1");
        sqlx::query_as::<_, Sprint>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's sprints in sprint-number order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Sprint>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sprints WHERE project_id = $1 ORDER BY sprint_number"
        );
        sqlx::query_as::<_, Sprint>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Set a sprint's status, returning the updated row.
    pub async fn set_status(
        conn: &mut PgConnection,
        id: DbId,
        status: SprintStatus,
    ) -> Result<Option<Sprint>, sqlx::Error> {
        let query = format!(
            "UPDATE sprints SET status_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sprint>(&query)
            .bind(id)
            .bind(status.id())
            .fetch_optional(conn)
            .await
    }

    /// Atomically complete a sprint that is currently active.
    ///
    /// The status check is part of the statement, so a concurrent
    /// completion of the same sprint can't apply twice. Returns `None`
    /// when the sprint doesn't exist or wasn't active.
    pub async fn complete_if_active(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Sprint>, sqlx::Error> {
        let query = format!(
            "UPDATE sprints SET status_id = $2, updated_at = NOW()
             WHERE id = $1 AND status_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sprint>(&query)
            .bind(id)
            .bind(SprintStatus::Completed.id())
            .bind(SprintStatus::Active.id())
            .fetch_optional(conn)
            .await
    }

    /// Promote the sprint with the given number to active, returning the
    /// updated row, or `None` when no such sprint exists (the completed
    /// sprint was the last one).
    pub async fn activate_by_number(
        conn: &mut PgConnection,
        project_id: DbId,
        sprint_number: i32,
    ) -> Result<Option<Sprint>, sqlx::Error> {
        let query = format!(
            "UPDATE sprints SET status_id = $3, updated_at = NOW()
             WHERE project_id = $1 AND sprint_number = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sprint>(&query)
            .bind(project_id)
            .bind(sprint_number)
            .bind(SprintStatus::Active.id())
            .fetch_optional(conn)
            .await
    }
}
