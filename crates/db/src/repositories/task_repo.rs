//! Repository for the `tasks`, `subtasks`, and `task_status_history`
//! tables.

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use sprintpilot_core::allocation::PlannedTask;
use sprintpilot_core::domain::TaskStatus;
use sprintpilot_core::types::{DbId, Timestamp};

use crate::models::status::StatusLookup;
use crate::models::task::{CreateTask, Subtask, Task, TaskStatusHistory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sprint_id, title, description, story_points, status_id, \
                        planned_date, completed_at, created_by, is_ai_assisted, sort_order, \
                        created_at, updated_at";

const SUBTASK_COLUMNS: &str = "id, task_id, title, is_done, sort_order, created_at, updated_at";

/// Provides operations for tasks and their subordinate rows.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a task materialized from an AI suggestion.
    pub async fn insert_planned(
        conn: &mut PgConnection,
        sprint_id: DbId,
        planned: &PlannedTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (sprint_id, title, description, story_points, status_id,
                 created_by, is_ai_assisted, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(sprint_id)
            .bind(&planned.title)
            .bind(&planned.description)
            .bind(planned.story_points)
            .bind(planned.status.id())
            .bind(planned.created_by)
            .bind(planned.is_ai_assisted)
            .bind(planned.sort_order)
            .fetch_one(conn)
            .await
    }

    /// Insert a manually created task. Starts in Backlog.
    pub async fn create(
        conn: &mut PgConnection,
        created_by: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (sprint_id, title, description, story_points, status_id,
                 planned_date, created_by, is_ai_assisted)
             VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.sprint_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.story_points)
            .bind(TaskStatus::Backlog.id())
            .bind(input.planned_date)
            .bind(created_by)
            .fetch_one(conn)
            .await
    }

    /// Find a task by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a sprint's tasks in sort order.
    pub async fn list_for_sprint(pool: &PgPool, sprint_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE sprint_id = $1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(sprint_id)
            .fetch_all(pool)
            .await
    }

    /// Move a task to a new workflow status.
    ///
    /// Any-to-any transitions are permitted. `completed_at` is stamped via
    /// `COALESCE` so only the *first* transition into Done sets it; later
    /// transitions (including back out of Done and in again) leave the
    /// original stamp untouched.
    pub async fn set_status(
        conn: &mut PgConnection,
        id: DbId,
        status: TaskStatus,
        now: Timestamp,
    ) -> Result<Option<Task>, sqlx::Error> {
        let stamp = if status.is_done() { Some(now) } else { None };
        let query = format!(
            "UPDATE tasks
             SET status_id = $2, completed_at = COALESCE(completed_at, $3), updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(status.id())
            .bind(stamp)
            .fetch_optional(conn)
            .await
    }

    /// Set or clear a task's planned calendar date.
    pub async fn set_planned_date(
        conn: &mut PgConnection,
        id: DbId,
        planned_date: Option<NaiveDate>,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET planned_date = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(planned_date)
            .fetch_optional(conn)
            .await
    }

    /// Append one transition to the status log. The log is never updated
    /// or deleted.
    pub async fn append_history(
        conn: &mut PgConnection,
        task_id: DbId,
        from: Option<TaskStatus>,
        to: TaskStatus,
        changed_at: Timestamp,
    ) -> Result<TaskStatusHistory, sqlx::Error> {
        sqlx::query_as::<_, TaskStatusHistory>(
            "INSERT INTO task_status_history (task_id, from_status_id, to_status_id, changed_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, task_id, from_status_id, to_status_id, changed_at",
        )
        .bind(task_id)
        .bind(from.map(StatusLookup::id))
        .bind(to.id())
        .bind(changed_at)
        .fetch_one(conn)
        .await
    }

    /// List a task's transition log, oldest first.
    pub async fn list_history(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<TaskStatusHistory>, sqlx::Error> {
        sqlx::query_as::<_, TaskStatusHistory>(
            "SELECT id, task_id, from_status_id, to_status_id, changed_at
             FROM task_status_history
             WHERE task_id = $1
             ORDER BY changed_at, id",
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }

    /// Insert subtask rows in order under a task.
    pub async fn create_subtasks(
        conn: &mut PgConnection,
        task_id: DbId,
        titles: &[String],
    ) -> Result<Vec<Subtask>, sqlx::Error> {
        let mut subtasks = Vec::with_capacity(titles.len());
        for (position, title) in titles.iter().enumerate() {
            let query = format!(
                "INSERT INTO subtasks (task_id, title, sort_order)
                 VALUES ($1, $2, $3)
                 RETURNING {SUBTASK_COLUMNS}"
            );
            let subtask = sqlx::query_as::<_, Subtask>(&query)
                .bind(task_id)
                .bind(title)
                .bind(position as i32)
                .fetch_one(&mut *conn)
                .await?;
            subtasks.push(subtask);
        }
        Ok(subtasks)
    }

    /// List a task's subtasks in sort order.
    pub async fn list_subtasks(pool: &PgPool, task_id: DbId) -> Result<Vec<Subtask>, sqlx::Error> {
        let query = format!(
            "SELECT {SUBTASK_COLUMNS} FROM subtasks WHERE task_id = $1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Subtask>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }
}
