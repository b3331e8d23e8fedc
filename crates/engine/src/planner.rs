//! Project planning: the gated suggestion call, the allocator, and
//! transactional persistence of the resulting plan.

use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use sprintpilot_ai::{AiProvider, SubtaskSuggestionRequest, TaskSuggestionRequest};
use sprintpilot_core::allocation::allocate_sprints;
use sprintpilot_core::badges::BadgeId;
use sprintpilot_core::types::{DbId, Timestamp};
use sprintpilot_db::models::project::{CreateProject, ProjectAggregate};
use sprintpilot_db::models::task::Subtask;
use sprintpilot_db::repositories::{ProjectRepo, TaskRepo, UserRepo};

use crate::badges::refresh_badges;
use crate::error::{EngineError, EngineResult};
use crate::gate::AiGate;

/// Request to plan a new project with AI assistance.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlanProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Sprint count the plan should target. The provider may deviate; the
    /// allocator trusts the maximum observed (clamped) bucket.
    #[validate(range(min = 1, max = 12))]
    pub target_sprints: i32,
    /// Overrides the user's default sprint duration when present.
    #[validate(range(min = 1, max = 2))]
    pub sprint_duration_weeks: Option<i16>,
}

/// Everything a caller needs after planning a project.
#[derive(Debug)]
pub struct PlanProjectOutcome {
    pub aggregate: ProjectAggregate,
    pub new_badges: Vec<BadgeId>,
    /// The suggestion call was denied by the quota gate; the project was
    /// still created (degenerate single-sprint plan) and the UI should
    /// prompt an upgrade.
    pub quota_exceeded: bool,
}

/// Plan and persist a new project.
///
/// The provider call happens *outside* the transaction (it is slow and
/// failure-prone); everything that mutates state — project, sprints,
/// tasks, subtasks, badge grants — commits atomically afterwards. A
/// provider failure or quota denial degrades to an empty suggestion list,
/// which the allocator turns into a minimal valid single-sprint project.
pub async fn plan_project(
    pool: &PgPool,
    provider: &dyn AiProvider,
    gate: &AiGate,
    user_id: DbId,
    request: PlanProjectRequest,
    now: Timestamp,
) -> EngineResult<PlanProjectOutcome> {
    request.validate()?;

    let user = UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| EngineError::not_found("user", user_id))?;

    let duration_weeks = request
        .sprint_duration_weeks
        .unwrap_or(user.sprint_duration_weeks);

    let suggestion_request = TaskSuggestionRequest {
        project_name: request.name.clone(),
        project_description: request.description.clone(),
        target_sprints: request.target_sprints,
        sprint_duration_weeks: i32::from(duration_weeks),
    };
    let suggestions = gate
        .call(
            pool,
            &user,
            Vec::new(),
            provider.suggest_tasks(&suggestion_request),
        )
        .await?;

    let plan = allocate_sprints(
        &suggestions.value,
        request.target_sprints,
        i32::from(duration_weeks),
        now,
        user.id,
    );

    let input = CreateProject {
        name: request.name,
        description: request.description,
        sprint_duration_weeks: duration_weeks,
    };

    let mut tx = pool.begin().await?;
    let aggregate = ProjectRepo::create_with_plan(&mut *tx, user.id, &input, &plan).await?;
    let new_badges = refresh_badges(&mut *tx, user.id, now).await?;
    tx.commit().await?;

    tracing::info!(
        user_id = user.id,
        project_id = aggregate.project.id,
        sprints = plan.total_sprints,
        ai_tasks = suggestions.value.len(),
        "Planned new project"
    );

    Ok(PlanProjectOutcome {
        aggregate,
        new_badges,
        quota_exceeded: suggestions.quota_exceeded,
    })
}

/// Outcome of a gated subtask suggestion.
#[derive(Debug)]
pub struct SuggestSubtasksOutcome {
    pub subtasks: Vec<Subtask>,
    pub new_badges: Vec<BadgeId>,
    pub quota_exceeded: bool,
}

/// Ask the provider to break a task into subtasks and persist the result.
///
/// Denial or provider failure leaves the task untouched and returns no
/// subtasks.
pub async fn suggest_subtasks(
    pool: &PgPool,
    provider: &dyn AiProvider,
    gate: &AiGate,
    user_id: DbId,
    task_id: DbId,
    now: Timestamp,
) -> EngineResult<SuggestSubtasksOutcome> {
    let user = UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| EngineError::not_found("user", user_id))?;

    let task = TaskRepo::find_by_id(pool, task_id)
        .await?
        .ok_or_else(|| EngineError::not_found("task", task_id))?;

    let suggestion_request = SubtaskSuggestionRequest {
        task_title: task.title.clone(),
        task_description: task.description.clone(),
    };
    let titles = gate
        .call(
            pool,
            &user,
            Vec::new(),
            provider.suggest_subtasks(&suggestion_request),
        )
        .await?;

    if titles.value.is_empty() {
        return Ok(SuggestSubtasksOutcome {
            subtasks: Vec::new(),
            new_badges: Vec::new(),
            quota_exceeded: titles.quota_exceeded,
        });
    }

    let mut tx = pool.begin().await?;
    let subtasks = TaskRepo::create_subtasks(&mut *tx, task.id, &titles.value).await?;
    let new_badges = refresh_badges(&mut *tx, user.id, now).await?;
    tx.commit().await?;

    Ok(SuggestSubtasksOutcome {
        subtasks,
        new_badges,
        quota_exceeded: titles.quota_exceeded,
    })
}
