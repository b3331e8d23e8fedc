//! Snapshot assembly for badge evaluation.
//!
//! Reads a user's full aggregate (badges, check-ins, projects, sprints,
//! tasks) into the plain-data snapshot the evaluator consumes. Run inside
//! the same transaction as the mutation that triggered the re-check so the
//! snapshot is consistent for the duration of the evaluation.

use chrono::NaiveDate;
use sqlx::PgConnection;
use sprintpilot_core::domain::{ProjectStatus, SprintStatus, TaskStatus};
use sprintpilot_core::snapshot::{ProjectSnapshot, SprintSnapshot, TaskSnapshot, UserSnapshot};
use sprintpilot_core::types::{DbId, Timestamp};

use crate::models::status::{StatusId, StatusLookup};
use crate::repositories::badge_repo::BadgeRepo;

/// Assembles evaluation snapshots.
pub struct SnapshotRepo;

impl SnapshotRepo {
    /// Load the full evaluation snapshot for one user.
    pub async fn load(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<UserSnapshot, sqlx::Error> {
        let earned_badges = BadgeRepo::earned_ids(&mut *conn, user_id).await?;

        let checkin_history: Vec<Timestamp> = sqlx::query_as::<_, (Timestamp,)>(
            "SELECT checked_in_at FROM daily_checkins WHERE user_id = $1 ORDER BY checked_in_at",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .map(|(ts,)| ts)
        .collect();

        let project_rows: Vec<(DbId, StatusId)> = sqlx::query_as(
            "SELECT id, status_id FROM projects WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

        let sprint_rows: Vec<(DbId, DbId, StatusId, Option<Timestamp>, Option<Timestamp>)> =
            sqlx::query_as(
                "SELECT s.id, s.project_id, s.status_id, s.start_date, s.end_date
                 FROM sprints s
                 JOIN projects p ON p.id = s.project_id
                 WHERE p.user_id = $1
                 ORDER BY s.project_id, s.sprint_number",
            )
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await?;

        let task_rows: Vec<(DbId, StatusId, Option<Timestamp>, Option<NaiveDate>)> =
            sqlx::query_as(
                "SELECT t.sprint_id, t.status_id, t.completed_at, t.planned_date
                 FROM tasks t
                 JOIN sprints s ON s.id = t.sprint_id
                 JOIN projects p ON p.id = s.project_id
                 WHERE p.user_id = $1
                 ORDER BY t.sprint_id, t.sort_order, t.id",
            )
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await?;

        let mut projects = Vec::with_capacity(project_rows.len());
        for (project_id, project_status) in project_rows {
            let status = ProjectStatus::from_id(project_status)
                .ok_or_else(|| decode_error("projects.status_id", project_status))?;

            let mut sprints = Vec::new();
            for (sprint_id, sprint_project, sprint_status, start_date, end_date) in &sprint_rows {
                if *sprint_project != project_id {
                    continue;
                }
                let sprint_status = SprintStatus::from_id(*sprint_status)
                    .ok_or_else(|| decode_error("sprints.status_id", *sprint_status))?;

                let mut tasks = Vec::new();
                for (task_sprint, task_status, completed_at, planned_date) in &task_rows {
                    if task_sprint != sprint_id {
                        continue;
                    }
                    let task_status = TaskStatus::from_id(*task_status)
                        .ok_or_else(|| decode_error("tasks.status_id", *task_status))?;
                    tasks.push(TaskSnapshot {
                        status: task_status,
                        completed_at: *completed_at,
                        planned_date: *planned_date,
                    });
                }

                sprints.push(SprintSnapshot {
                    status: sprint_status,
                    start_date: *start_date,
                    end_date: *end_date,
                    tasks,
                });
            }

            projects.push(ProjectSnapshot { status, sprints });
        }

        Ok(UserSnapshot {
            earned_badges,
            checkin_history,
            projects,
        })
    }
}

/// An id outside the seeded lookup set means the row can't be mapped back
/// to the domain — surface it as a decode failure.
fn decode_error(column: &str, id: StatusId) -> sqlx::Error {
    sqlx::Error::Decode(format!("unknown lookup id {id} in {column}").into())
}
