//! Day-to-day progress operations: check-ins, task transitions, planned
//! dates, and sprint completion.
//!
//! Every operation here mutates state and therefore ends with a badge
//! re-evaluation inside the same transaction.

use chrono::NaiveDate;
use sqlx::PgPool;

use sprintpilot_core::badges::BadgeId;
use sprintpilot_core::domain::{ProjectStatus, TaskStatus};
use sprintpilot_core::error::CoreError;
use sprintpilot_core::types::{DbId, Timestamp};
use sprintpilot_db::models::checkin::DailyCheckin;
use sprintpilot_db::models::sprint::Sprint;
use sprintpilot_db::models::status::StatusLookup;
use sprintpilot_db::models::task::Task;
use sprintpilot_db::repositories::{CheckinRepo, ProjectRepo, SprintRepo, TaskRepo};

use crate::badges::refresh_badges;
use crate::error::{EngineError, EngineResult};

/// Outcome of a daily check-in.
#[derive(Debug)]
pub struct CheckinOutcome {
    pub checkin: DailyCheckin,
    pub new_badges: Vec<BadgeId>,
}

/// Record a check-in for the user at the given instant.
pub async fn record_checkin(
    pool: &PgPool,
    user_id: DbId,
    now: Timestamp,
) -> EngineResult<CheckinOutcome> {
    let mut tx = pool.begin().await?;
    let checkin = CheckinRepo::record(&mut *tx, user_id, now).await?;
    let new_badges = refresh_badges(&mut *tx, user_id, now).await?;
    tx.commit().await?;
    Ok(CheckinOutcome { checkin, new_badges })
}

/// Outcome of a task mutation.
#[derive(Debug)]
pub struct TaskOutcome {
    pub task: Task,
    pub new_badges: Vec<BadgeId>,
}

/// Move a task to a new workflow status.
///
/// Any-to-any transitions are permitted. A real transition (status
/// actually changed) is appended to the immutable history log; setting the
/// same status twice mutates nothing but still re-checks badges.
pub async fn update_task_status(
    pool: &PgPool,
    user_id: DbId,
    task_id: DbId,
    status: TaskStatus,
    now: Timestamp,
) -> EngineResult<TaskOutcome> {
    let previous = TaskRepo::find_by_id(pool, task_id)
        .await?
        .ok_or_else(|| EngineError::not_found("task", task_id))?;
    let previous_status = TaskStatus::from_id(previous.status_id);

    let mut tx = pool.begin().await?;
    let task = TaskRepo::set_status(&mut *tx, task_id, status, now)
        .await?
        .ok_or_else(|| EngineError::not_found("task", task_id))?;

    if previous_status != Some(status) {
        TaskRepo::append_history(&mut *tx, task_id, previous_status, status, now).await?;
    }

    let new_badges = refresh_badges(&mut *tx, user_id, now).await?;
    tx.commit().await?;
    Ok(TaskOutcome { task, new_badges })
}

/// Set or clear the calendar day a task is planned for.
pub async fn set_task_planned_date(
    pool: &PgPool,
    user_id: DbId,
    task_id: DbId,
    planned_date: Option<NaiveDate>,
    now: Timestamp,
) -> EngineResult<TaskOutcome> {
    let mut tx = pool.begin().await?;
    let task = TaskRepo::set_planned_date(&mut *tx, task_id, planned_date)
        .await?
        .ok_or_else(|| EngineError::not_found("task", task_id))?;
    let new_badges = refresh_badges(&mut *tx, user_id, now).await?;
    tx.commit().await?;
    Ok(TaskOutcome { task, new_badges })
}

/// Outcome of completing a sprint.
#[derive(Debug)]
pub struct SprintCompletionOutcome {
    pub completed: Sprint,
    /// The sprint promoted to active, when the completed one wasn't last.
    pub activated: Option<Sprint>,
    /// Set when the completed sprint was the project's final sprint.
    pub project_completed: bool,
    pub new_badges: Vec<BadgeId>,
}

/// Complete the currently active sprint and advance the active pointer.
///
/// Only an active sprint may complete. The next sprint (by number) becomes
/// active in the same transaction, preserving at-most-one-active;
/// completing the final sprint marks the whole project completed instead.
pub async fn complete_sprint(
    pool: &PgPool,
    user_id: DbId,
    sprint_id: DbId,
    now: Timestamp,
) -> EngineResult<SprintCompletionOutcome> {
    if SprintRepo::find_by_id(pool, sprint_id).await?.is_none() {
        return Err(EngineError::not_found("sprint", sprint_id));
    }

    let mut tx = pool.begin().await?;

    // The status check is part of the UPDATE, so a sprint that exists but
    // isn't active comes back as None here.
    let completed = SprintRepo::complete_if_active(&mut *tx, sprint_id)
        .await?
        .ok_or_else(|| {
            EngineError::Core(CoreError::Conflict(
                "only an active sprint can be completed".to_string(),
            ))
        })?;

    let activated = SprintRepo::activate_by_number(
        &mut *tx,
        completed.project_id,
        completed.sprint_number + 1,
    )
    .await?;

    let project_completed = activated.is_none();
    if project_completed {
        ProjectRepo::set_status(&mut *tx, completed.project_id, ProjectStatus::Completed)
            .await?;
    }

    let new_badges = refresh_badges(&mut *tx, user_id, now).await?;
    tx.commit().await?;

    tracing::info!(
        user_id,
        sprint_id,
        project_id = completed.project_id,
        project_completed,
        "Completed sprint"
    );

    Ok(SprintCompletionOutcome {
        completed,
        activated,
        project_completed,
        new_badges,
    })
}
