//! Repository for the `projects` table and whole-plan persistence.

use sqlx::{PgConnection, PgPool};
use sprintpilot_core::allocation::ProjectPlan;
use sprintpilot_core::domain::ProjectStatus;
use sprintpilot_core::types::DbId;

use crate::models::project::{
    CreateProject, Project, ProjectAggregate, SprintAggregate, TaskAggregate,
};
use crate::models::sprint::Sprint;
use crate::models::status::StatusLookup;
use crate::repositories::task_repo::TaskRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, description, status_id, sprint_duration_weeks, \
                        total_sprints, estimated_completion_date, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Persist an allocated project plan: the project row plus every
    /// sprint, task, and subtask the allocator produced.
    ///
    /// Takes a connection so the caller can wrap this together with the
    /// badge re-check in one transaction — a crash mid-write must never
    /// leave sprint numbering non-contiguous.
    pub async fn create_with_plan(
        conn: &mut PgConnection,
        user_id: DbId,
        input: &CreateProject,
        plan: &ProjectPlan,
    ) -> Result<ProjectAggregate, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (user_id, name, description, status_id, sprint_duration_weeks,
                 total_sprints, estimated_completion_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(ProjectStatus::Active.id())
            .bind(input.sprint_duration_weeks)
            .bind(plan.total_sprints)
            .bind(plan.estimated_completion)
            .fetch_one(&mut *conn)
            .await?;

        let mut sprints = Vec::with_capacity(plan.sprints.len());
        for sprint_plan in &plan.sprints {
            let sprint = sqlx::query_as::<_, Sprint>(
                "INSERT INTO sprints
                    (project_id, sprint_number, status_id, start_date, end_date)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING id, project_id, sprint_number, status_id, start_date, end_date,
                           created_at, updated_at",
            )
            .bind(project.id)
            .bind(sprint_plan.sprint_number)
            .bind(sprint_plan.status.id())
            .bind(sprint_plan.start_date)
            .bind(sprint_plan.end_date)
            .fetch_one(&mut *conn)
            .await?;

            let mut tasks = Vec::with_capacity(sprint_plan.tasks.len());
            for planned in &sprint_plan.tasks {
                let task = TaskRepo::insert_planned(&mut *conn, sprint.id, planned).await?;
                let subtasks =
                    TaskRepo::create_subtasks(&mut *conn, task.id, &planned.subtasks).await?;
                tasks.push(TaskAggregate { task, subtasks });
            }
            sprints.push(SprintAggregate { sprint, tasks });
        }

        Ok(ProjectAggregate { project, sprints })
    }

    /// Find a project by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's projects, most recently created first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects WHERE user_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Set a project's lifecycle status. Returns `true` if the row was
    /// updated.
    pub async fn set_status(
        conn: &mut PgConnection,
        id: DbId,
        status: ProjectStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET status_id = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status.id())
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
