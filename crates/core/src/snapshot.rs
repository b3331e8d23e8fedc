//! Plain-data snapshot of a user's aggregate for badge evaluation.
//!
//! The persistence layer assembles one of these inside a transaction; the
//! evaluator treats it as immutable for the duration of a single call.

use chrono::NaiveDate;

use crate::badges::BadgeId;
use crate::domain::{ProjectStatus, SprintStatus, TaskStatus};
use crate::types::Timestamp;

/// Everything the badge evaluator needs to know about one user.
#[derive(Debug, Clone, Default)]
pub struct UserSnapshot {
    /// Badge ids already earned. Append-only; never re-evaluated.
    pub earned_badges: Vec<BadgeId>,
    /// Raw check-in timestamps, possibly several per calendar day.
    pub checkin_history: Vec<Timestamp>,
    pub projects: Vec<ProjectSnapshot>,
}

#[derive(Debug, Clone)]
pub struct ProjectSnapshot {
    pub status: ProjectStatus,
    /// Sprints in `sprint_number` order.
    pub sprints: Vec<SprintSnapshot>,
}

#[derive(Debug, Clone)]
pub struct SprintSnapshot {
    pub status: SprintStatus,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub tasks: Vec<TaskSnapshot>,
}

#[derive(Debug, Clone)]
pub struct TaskSnapshot {
    pub status: TaskStatus,
    pub completed_at: Option<Timestamp>,
    /// Calendar day this task is planned for, if any. Feeds the planning
    /// coverage rule only.
    pub planned_date: Option<NaiveDate>,
}

impl UserSnapshot {
    /// Iterate all tasks across all projects and sprints.
    pub fn all_tasks(&self) -> impl Iterator<Item = &TaskSnapshot> {
        self.projects
            .iter()
            .flat_map(|p| p.sprints.iter())
            .flat_map(|s| s.tasks.iter())
    }
}
