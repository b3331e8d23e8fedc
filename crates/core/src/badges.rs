//! Badge catalog and the achievement evaluation engine.
//!
//! The catalog is static and versioned: ids, slugs, and declaration order
//! must match the seed data in the `badges` table migration. Earning a badge
//! is one-way — the evaluator only ever reports badges *not yet* present in
//! the snapshot, so running it twice on unchanged data yields nothing new.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::domain::{ProjectStatus, SprintStatus};
use crate::snapshot::{SprintSnapshot, UserSnapshot};

// ---------------------------------------------------------------------------
// Rule thresholds
// ---------------------------------------------------------------------------

/// Distinct check-in calendar dates required for Streak Master.
pub const STREAK_MASTER_DAYS: usize = 5;

/// Completed sprints within a single project required for Sprint Warrior.
pub const SPRINT_WARRIOR_SPRINTS: usize = 3;

/// A task completed at or after this hour of day earns Night Owl.
pub const NIGHT_OWL_HOUR: u32 = 22;

/// A task completed strictly before this hour of day earns Early Bird.
pub const EARLY_BIRD_HOUR: u32 = 7;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Stable badge identifiers.
///
/// Discriminants match the SMALLINT ids seeded in the `badges` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum BadgeId {
    GoalHunter = 1,
    SprintWarrior = 2,
    StreakMaster = 3,
    NightOwl = 4,
    EarlyBird = 5,
    PlanningGuru = 6,
}

impl BadgeId {
    /// Stable string id used in the catalog table and on the wire.
    pub fn slug(self) -> &'static str {
        match self {
            Self::GoalHunter => "goal_hunter",
            Self::SprintWarrior => "sprint_warrior",
            Self::StreakMaster => "streak_master",
            Self::NightOwl => "night_owl",
            Self::EarlyBird => "early_bird",
            Self::PlanningGuru => "planning_guru",
        }
    }

    /// Reverse lookup from a stored slug.
    pub fn from_slug(slug: &str) -> Option<Self> {
        CATALOG.iter().find(|d| d.id.slug() == slug).map(|d| d.id)
    }
}

/// Broad badge grouping used by the UI for shelf placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Completion,
    Consistency,
    Timing,
    Planning,
}

/// One immutable catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct BadgeDef {
    pub id: BadgeId,
    pub name: &'static str,
    pub criteria: &'static str,
    pub icon: &'static str,
    pub kind: BadgeKind,
}

/// The full badge catalog in declaration order.
///
/// Evaluation results are reported in this order, which keeps output
/// deterministic for identical snapshots.
pub const CATALOG: &[BadgeDef] = &[
    BadgeDef {
        id: BadgeId::GoalHunter,
        name: "Goal Hunter",
        criteria: "Complete your first project",
        icon: "trophy",
        kind: BadgeKind::Completion,
    },
    BadgeDef {
        id: BadgeId::SprintWarrior,
        name: "Sprint Warrior",
        criteria: "Complete 3 sprints in a single project",
        icon: "zap",
        kind: BadgeKind::Completion,
    },
    BadgeDef {
        id: BadgeId::StreakMaster,
        name: "Streak Master",
        criteria: "Check in on 5 different days",
        icon: "flame",
        kind: BadgeKind::Consistency,
    },
    BadgeDef {
        id: BadgeId::NightOwl,
        name: "Night Owl",
        criteria: "Finish a task after 10 PM",
        icon: "moon",
        kind: BadgeKind::Timing,
    },
    BadgeDef {
        id: BadgeId::EarlyBird,
        name: "Early Bird",
        criteria: "Finish a task before 7 AM",
        icon: "sunrise",
        kind: BadgeKind::Timing,
    },
    BadgeDef {
        id: BadgeId::PlanningGuru,
        name: "Planning Guru",
        criteria: "Plan a task for every day of an active sprint",
        icon: "calendar",
        kind: BadgeKind::Planning,
    },
];

/// Look up the catalog entry for a badge id.
pub fn definition(id: BadgeId) -> &'static BadgeDef {
    CATALOG
        .iter()
        .find(|d| d.id == id)
        .unwrap_or_else(|| unreachable!("catalog covers every BadgeId variant"))
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Evaluate all badge rules against a snapshot.
///
/// Returns exactly the badges newly crossing their threshold, in catalog
/// order. Badges already present in `snapshot.earned_badges` are skipped
/// entirely; rules do not short-circuit each other. The function is pure —
/// it never reads the wall clock.
pub fn evaluate_badges(snapshot: &UserSnapshot) -> Vec<BadgeId> {
    CATALOG
        .iter()
        .filter(|def| !snapshot.earned_badges.contains(&def.id))
        .filter(|def| rule_satisfied(def.id, snapshot))
        .map(|def| def.id)
        .collect()
}

fn rule_satisfied(id: BadgeId, snapshot: &UserSnapshot) -> bool {
    match id {
        BadgeId::GoalHunter => has_completed_project(snapshot),
        BadgeId::SprintWarrior => has_sprint_warrior_project(snapshot),
        BadgeId::StreakMaster => distinct_checkin_days(snapshot) >= STREAK_MASTER_DAYS,
        BadgeId::NightOwl => has_completion_at(snapshot, |hour| hour >= NIGHT_OWL_HOUR),
        BadgeId::EarlyBird => has_completion_at(snapshot, |hour| hour < EARLY_BIRD_HOUR),
        BadgeId::PlanningGuru => has_fully_planned_active_sprint(snapshot),
    }
}

fn has_completed_project(snapshot: &UserSnapshot) -> bool {
    snapshot
        .projects
        .iter()
        .any(|p| p.status == ProjectStatus::Completed)
}

fn has_sprint_warrior_project(snapshot: &UserSnapshot) -> bool {
    snapshot.projects.iter().any(|p| {
        p.sprints
            .iter()
            .filter(|s| s.status == SprintStatus::Completed)
            .count()
            >= SPRINT_WARRIOR_SPRINTS
    })
}

/// Count distinct calendar dates across the raw check-in history.
/// Several check-ins on the same day collapse to one.
fn distinct_checkin_days(snapshot: &UserSnapshot) -> usize {
    snapshot
        .checkin_history
        .iter()
        .map(|ts| ts.date_naive())
        .collect::<BTreeSet<NaiveDate>>()
        .len()
}

fn has_completion_at(snapshot: &UserSnapshot, hour_matches: impl Fn(u32) -> bool) -> bool {
    snapshot.all_tasks().any(|task| {
        task.status.is_done()
            && task
                .completed_at
                .is_some_and(|done| hour_matches(done.hour()))
    })
}

/// True when at least one active sprint has every calendar day of its
/// `[start, end]` span covered by some task's planned date. Stops at the
/// first satisfying sprint.
fn has_fully_planned_active_sprint(snapshot: &UserSnapshot) -> bool {
    snapshot
        .projects
        .iter()
        .flat_map(|p| p.sprints.iter())
        .filter(|s| s.status == SprintStatus::Active)
        .any(sprint_fully_planned)
}

fn sprint_fully_planned(sprint: &SprintSnapshot) -> bool {
    let (Some(start), Some(end)) = (sprint.start_date, sprint.end_date) else {
        return false;
    };
    let start = start.date_naive();
    let end = end.date_naive();
    if end < start {
        return false;
    }

    let planned: BTreeSet<NaiveDate> = sprint
        .tasks
        .iter()
        .filter_map(|t| t.planned_date)
        .collect();

    let mut day = start;
    loop {
        if !planned.contains(&day) {
            return false;
        }
        if day == end {
            return true;
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => return false,
        };
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::TaskStatus;
    use crate::snapshot::{ProjectSnapshot, SprintSnapshot, TaskSnapshot};
    use crate::types::Timestamp;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn done_task(completed_at: Timestamp) -> TaskSnapshot {
        TaskSnapshot {
            status: TaskStatus::Done,
            completed_at: Some(completed_at),
            planned_date: None,
        }
    }

    fn planned_task(date: NaiveDate) -> TaskSnapshot {
        TaskSnapshot {
            status: TaskStatus::Todo,
            completed_at: None,
            planned_date: Some(date),
        }
    }

    fn sprint(status: SprintStatus, tasks: Vec<TaskSnapshot>) -> SprintSnapshot {
        SprintSnapshot {
            status,
            start_date: None,
            end_date: None,
            tasks,
        }
    }

    fn single_project(status: ProjectStatus, sprints: Vec<SprintSnapshot>) -> UserSnapshot {
        UserSnapshot {
            earned_badges: Vec::new(),
            checkin_history: Vec::new(),
            projects: vec![ProjectSnapshot { status, sprints }],
        }
    }

    // -----------------------------------------------------------------------
    // Completion rules
    // -----------------------------------------------------------------------

    #[test]
    fn goal_hunter_needs_a_completed_project() {
        let snapshot = single_project(ProjectStatus::Active, Vec::new());
        assert!(!evaluate_badges(&snapshot).contains(&BadgeId::GoalHunter));

        let snapshot = single_project(ProjectStatus::Completed, Vec::new());
        assert!(evaluate_badges(&snapshot).contains(&BadgeId::GoalHunter));
    }

    #[test]
    fn sprint_warrior_counts_within_one_project() {
        let two_done = vec![
            sprint(SprintStatus::Completed, Vec::new()),
            sprint(SprintStatus::Completed, Vec::new()),
            sprint(SprintStatus::Active, Vec::new()),
        ];
        let snapshot = single_project(ProjectStatus::Active, two_done);
        assert!(!evaluate_badges(&snapshot).contains(&BadgeId::SprintWarrior));

        let three_done = vec![
            sprint(SprintStatus::Completed, Vec::new()),
            sprint(SprintStatus::Completed, Vec::new()),
            sprint(SprintStatus::Completed, Vec::new()),
        ];
        let snapshot = single_project(ProjectStatus::Active, three_done);
        assert!(evaluate_badges(&snapshot).contains(&BadgeId::SprintWarrior));
    }

    #[test]
    fn sprint_warrior_does_not_sum_across_projects() {
        let project = |n: usize| ProjectSnapshot {
            status: ProjectStatus::Active,
            sprints: (0..n)
                .map(|_| sprint(SprintStatus::Completed, Vec::new()))
                .collect(),
        };
        let snapshot = UserSnapshot {
            earned_badges: Vec::new(),
            checkin_history: Vec::new(),
            projects: vec![project(2), project(2)],
        };
        assert!(!evaluate_badges(&snapshot).contains(&BadgeId::SprintWarrior));
    }

    // -----------------------------------------------------------------------
    // Check-in streak
    // -----------------------------------------------------------------------

    #[test]
    fn streak_master_counts_distinct_days_only() {
        // Seven entries over five distinct calendar dates.
        let snapshot = UserSnapshot {
            checkin_history: vec![
                at(2024, 7, 1, 8, 0),
                at(2024, 7, 1, 20, 0),
                at(2024, 7, 2, 9, 0),
                at(2024, 7, 3, 9, 0),
                at(2024, 7, 3, 23, 59),
                at(2024, 7, 4, 9, 0),
                at(2024, 7, 5, 9, 0),
            ],
            ..Default::default()
        };
        assert!(evaluate_badges(&snapshot).contains(&BadgeId::StreakMaster));
    }

    #[test]
    fn four_distinct_days_is_not_enough() {
        let snapshot = UserSnapshot {
            checkin_history: (1..=4).map(|d| at(2024, 7, d, 9, 0)).collect(),
            ..Default::default()
        };
        assert!(!evaluate_badges(&snapshot).contains(&BadgeId::StreakMaster));
    }

    // -----------------------------------------------------------------------
    // Timing rules
    // -----------------------------------------------------------------------

    #[test]
    fn night_owl_boundary_is_ten_pm() {
        let earns = single_project(
            ProjectStatus::Active,
            vec![sprint(SprintStatus::Active, vec![done_task(at(2024, 7, 1, 22, 0))])],
        );
        assert!(evaluate_badges(&earns).contains(&BadgeId::NightOwl));

        let misses = single_project(
            ProjectStatus::Active,
            vec![sprint(SprintStatus::Active, vec![done_task(at(2024, 7, 1, 21, 59))])],
        );
        assert!(!evaluate_badges(&misses).contains(&BadgeId::NightOwl));
    }

    #[test]
    fn early_bird_boundary_is_seven_am() {
        let earns = single_project(
            ProjectStatus::Active,
            vec![sprint(SprintStatus::Active, vec![done_task(at(2024, 7, 1, 6, 59))])],
        );
        assert!(evaluate_badges(&earns).contains(&BadgeId::EarlyBird));

        let misses = single_project(
            ProjectStatus::Active,
            vec![sprint(SprintStatus::Active, vec![done_task(at(2024, 7, 1, 7, 0))])],
        );
        assert!(!evaluate_badges(&misses).contains(&BadgeId::EarlyBird));
    }

    #[test]
    fn non_done_tasks_never_count_for_timing() {
        let mut task = done_task(at(2024, 7, 1, 23, 0));
        task.status = TaskStatus::Review;
        let snapshot = single_project(
            ProjectStatus::Active,
            vec![sprint(SprintStatus::Active, vec![task])],
        );
        assert!(!evaluate_badges(&snapshot).contains(&BadgeId::NightOwl));
    }

    // -----------------------------------------------------------------------
    // Planning coverage
    // -----------------------------------------------------------------------

    fn planned_sprint(days: &[u32]) -> SprintSnapshot {
        SprintSnapshot {
            status: SprintStatus::Active,
            start_date: Some(at(2024, 7, 15, 0, 0)),
            end_date: Some(at(2024, 7, 17, 0, 0)),
            tasks: days
                .iter()
                .map(|d| planned_task(NaiveDate::from_ymd_opt(2024, 7, *d).unwrap()))
                .collect(),
        }
    }

    #[test]
    fn planning_guru_requires_every_day_covered() {
        // Three-day sprint with only two days planned: no badge.
        let partial = single_project(ProjectStatus::Active, vec![planned_sprint(&[15, 16])]);
        assert!(!evaluate_badges(&partial).contains(&BadgeId::PlanningGuru));

        // Adding the missing day earns it.
        let full = single_project(ProjectStatus::Active, vec![planned_sprint(&[15, 16, 17])]);
        assert!(evaluate_badges(&full).contains(&BadgeId::PlanningGuru));
    }

    #[test]
    fn planning_guru_ignores_inactive_sprints() {
        let mut covered = planned_sprint(&[15, 16, 17]);
        covered.status = SprintStatus::Planning;
        let snapshot = single_project(ProjectStatus::Active, vec![covered]);
        assert!(!evaluate_badges(&snapshot).contains(&BadgeId::PlanningGuru));
    }

    #[test]
    fn planning_guru_needs_both_sprint_dates() {
        let mut undated = planned_sprint(&[15, 16, 17]);
        undated.end_date = None;
        let snapshot = single_project(ProjectStatus::Active, vec![undated]);
        assert!(!evaluate_badges(&snapshot).contains(&BadgeId::PlanningGuru));
    }

    // -----------------------------------------------------------------------
    // Output contract
    // -----------------------------------------------------------------------

    #[test]
    fn evaluation_is_idempotent() {
        let mut snapshot = single_project(ProjectStatus::Completed, Vec::new());
        snapshot.checkin_history = (1..=5).map(|d| at(2024, 7, d, 9, 0)).collect();

        let first = evaluate_badges(&snapshot);
        assert!(!first.is_empty());

        snapshot.earned_badges.extend(first);
        assert!(evaluate_badges(&snapshot).is_empty());
    }

    #[test]
    fn already_earned_badges_are_skipped() {
        let mut snapshot = single_project(ProjectStatus::Completed, Vec::new());
        snapshot.earned_badges.push(BadgeId::GoalHunter);
        assert!(!evaluate_badges(&snapshot).contains(&BadgeId::GoalHunter));
    }

    #[test]
    fn results_come_back_in_catalog_order() {
        let mut snapshot = single_project(
            ProjectStatus::Completed,
            vec![sprint(SprintStatus::Active, vec![done_task(at(2024, 7, 1, 23, 0))])],
        );
        snapshot.checkin_history = (1..=5).map(|d| at(2024, 7, d, 9, 0)).collect();

        let earned = evaluate_badges(&snapshot);
        assert_eq!(
            earned,
            vec![BadgeId::GoalHunter, BadgeId::StreakMaster, BadgeId::NightOwl]
        );
    }

    #[test]
    fn empty_snapshot_earns_nothing() {
        assert!(evaluate_badges(&UserSnapshot::default()).is_empty());
    }

    #[test]
    fn catalog_covers_every_slug_roundtrip() {
        for def in CATALOG {
            assert_eq!(BadgeId::from_slug(def.id.slug()), Some(def.id));
        }
    }
}
