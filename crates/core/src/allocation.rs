//! Sprint allocation: distributing AI-suggested tasks into sprint buckets
//! with contiguous date ranges.
//!
//! Pure computation over already-validated suggestions; persistence of the
//! resulting plan is the caller's responsibility.

use chrono::Duration;

use crate::domain::{SprintStatus, TaskStatus};
use crate::suggestion::SuggestedTask;
use crate::types::{DbId, Timestamp};

/// Days in one week of sprint duration.
pub const DAYS_PER_WEEK: i64 = 7;

// ---------------------------------------------------------------------------
// Plan types
// ---------------------------------------------------------------------------

/// A fully formed project plan ready to be persisted in one transaction.
#[derive(Debug, Clone)]
pub struct ProjectPlan {
    /// Sprints in `sprint_number` order, 1-based and contiguous.
    pub sprints: Vec<SprintPlan>,
    /// Number of sprints in the plan. Always `>= 1`.
    pub total_sprints: i32,
    /// The day after the last sprint ends.
    pub estimated_completion: Timestamp,
}

/// One sprint slot in a plan. May hold no tasks: empty sprints are still
/// materialized so date ranges stay contiguous.
#[derive(Debug, Clone)]
pub struct SprintPlan {
    pub sprint_number: i32,
    pub status: SprintStatus,
    pub start_date: Timestamp,
    /// Inclusive end: `start_date + duration_days - 1`.
    pub end_date: Timestamp,
    pub tasks: Vec<PlannedTask>,
}

/// A task materialized from an AI suggestion, with empty status-history
/// scaffolding and provenance fields.
#[derive(Debug, Clone)]
pub struct PlannedTask {
    pub title: String,
    pub description: Option<String>,
    pub story_points: Option<i32>,
    pub status: TaskStatus,
    pub subtasks: Vec<String>,
    pub created_by: DbId,
    pub is_ai_assisted: bool,
    /// Position within the sprint, preserving suggestion order.
    pub sort_order: i32,
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

/// Partition a flat suggestion list into a project plan.
///
/// The sprint count is `max(1, max observed clamped sprint number)` — the
/// allocator trusts the AI's maximum observed bucket, not the original
/// request, so an undershooting provider yields fewer sprints than asked
/// for. Every slot `1..=final` exists even when its bucket is empty, and
/// the date cursor advances by exactly one sprint duration per slot.
///
/// Zero suggestions are not an error: the plan collapses to a single
/// active, empty sprint.
pub fn allocate_sprints(
    suggestions: &[SuggestedTask],
    requested_sprints: i32,
    duration_weeks: i32,
    anchor: Timestamp,
    created_by: DbId,
) -> ProjectPlan {
    let duration_days = i64::from(duration_weeks.max(1)) * DAYS_PER_WEEK;

    let clamped: Vec<i32> = suggestions
        .iter()
        .map(|s| s.clamped_sprint_number(requested_sprints))
        .collect();
    let total_sprints = clamped.iter().copied().max().unwrap_or(0).max(1);

    let mut sprints = Vec::with_capacity(total_sprints as usize);
    let mut cursor = anchor;

    for sprint_number in 1..=total_sprints {
        // Order-preserving filter: tasks keep the provider's ordering
        // within their bucket.
        let tasks: Vec<PlannedTask> = suggestions
            .iter()
            .zip(clamped.iter())
            .filter(|(_, bucket)| **bucket == sprint_number)
            .enumerate()
            .map(|(position, (suggestion, _))| PlannedTask {
                title: suggestion.title.clone(),
                description: suggestion.description.clone(),
                story_points: suggestion.story_points,
                status: TaskStatus::Todo,
                subtasks: suggestion.subtasks.clone(),
                created_by,
                is_ai_assisted: true,
                sort_order: position as i32,
            })
            .collect();

        let start_date = cursor;
        let end_date = cursor + Duration::days(duration_days - 1);
        cursor += Duration::days(duration_days);

        sprints.push(SprintPlan {
            sprint_number,
            status: if sprint_number == 1 {
                SprintStatus::Active
            } else {
                SprintStatus::Planning
            },
            start_date,
            end_date,
            tasks,
        });
    }

    ProjectPlan {
        sprints,
        total_sprints,
        estimated_completion: cursor,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn suggestion(title: &str, sprint: i32) -> SuggestedTask {
        SuggestedTask {
            title: title.to_string(),
            description: None,
            story_points: Some(2),
            suggested_sprint_number: sprint,
            subtasks: Vec::new(),
        }
    }

    fn anchor() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap()
    }

    // -----------------------------------------------------------------------
    // Contiguity
    // -----------------------------------------------------------------------

    #[test]
    fn sparse_buckets_still_produce_every_slot() {
        let batch = vec![
            suggestion("a", 1),
            suggestion("b", 3),
            suggestion("c", 5),
        ];
        let plan = allocate_sprints(&batch, 5, 1, anchor(), 7);

        assert_eq!(plan.total_sprints, 5);
        let numbers: Vec<i32> = plan.sprints.iter().map(|s| s.sprint_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert!(plan.sprints[1].tasks.is_empty());
        assert!(plan.sprints[3].tasks.is_empty());
        assert_eq!(plan.sprints[0].tasks.len(), 1);
        assert_eq!(plan.sprints[2].tasks.len(), 1);
        assert_eq!(plan.sprints[4].tasks.len(), 1);
    }

    #[test]
    fn date_ranges_are_contiguous_and_non_overlapping() {
        let batch = vec![suggestion("a", 1), suggestion("b", 3)];
        let plan = allocate_sprints(&batch, 3, 2, anchor(), 7);

        for pair in plan.sprints.windows(2) {
            let gap = pair[1].start_date - pair[0].end_date;
            assert_eq!(gap, Duration::days(1));
        }
        // Inclusive end: a 2-week sprint spans 14 calendar days.
        let first = &plan.sprints[0];
        assert_eq!(first.end_date - first.start_date, Duration::days(13));
    }

    #[test]
    fn empty_buckets_still_advance_the_cursor() {
        let batch = vec![suggestion("only", 3)];
        let plan = allocate_sprints(&batch, 3, 1, anchor(), 7);

        assert_eq!(plan.sprints[2].start_date, anchor() + Duration::days(14));
        assert_eq!(plan.estimated_completion, anchor() + Duration::days(21));
    }

    // -----------------------------------------------------------------------
    // Sprint count derivation
    // -----------------------------------------------------------------------

    #[test]
    fn trusts_max_observed_bucket_not_the_request() {
        // Provider undershoots: asked for 5 sprints, everything lands in 1-2.
        let batch = vec![suggestion("a", 1), suggestion("b", 2)];
        let plan = allocate_sprints(&batch, 5, 1, anchor(), 7);
        assert_eq!(plan.total_sprints, 2);
    }

    #[test]
    fn overshooting_suggestions_are_clamped_to_the_request() {
        let batch = vec![suggestion("a", 9)];
        let plan = allocate_sprints(&batch, 5, 1, anchor(), 7);
        assert_eq!(plan.total_sprints, 5);
        assert_eq!(plan.sprints[4].tasks.len(), 1);
    }

    #[test]
    fn zero_suggestions_degrade_to_one_active_empty_sprint() {
        let plan = allocate_sprints(&[], 4, 1, anchor(), 7);

        assert_eq!(plan.total_sprints, 1);
        assert_eq!(plan.sprints.len(), 1);
        assert_eq!(plan.sprints[0].status, SprintStatus::Active);
        assert!(plan.sprints[0].tasks.is_empty());
        assert_eq!(plan.estimated_completion, anchor() + Duration::days(7));
    }

    // -----------------------------------------------------------------------
    // Statuses and task materialization
    // -----------------------------------------------------------------------

    #[test]
    fn first_sprint_active_rest_planning() {
        let batch = vec![suggestion("a", 1), suggestion("b", 2), suggestion("c", 3)];
        let plan = allocate_sprints(&batch, 3, 1, anchor(), 7);

        assert_eq!(plan.sprints[0].status, SprintStatus::Active);
        assert_eq!(plan.sprints[1].status, SprintStatus::Planning);
        assert_eq!(plan.sprints[2].status, SprintStatus::Planning);
    }

    #[test]
    fn bucket_order_preserves_suggestion_order() {
        let batch = vec![
            suggestion("first", 2),
            suggestion("elsewhere", 1),
            suggestion("second", 2),
        ];
        let plan = allocate_sprints(&batch, 2, 1, anchor(), 7);

        let titles: Vec<&str> = plan.sprints[1].tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
        assert_eq!(plan.sprints[1].tasks[0].sort_order, 0);
        assert_eq!(plan.sprints[1].tasks[1].sort_order, 1);
    }

    #[test]
    fn materialized_tasks_carry_provenance() {
        let batch = vec![suggestion("a", 1)];
        let plan = allocate_sprints(&batch, 1, 1, anchor(), 42);

        let task = &plan.sprints[0].tasks[0];
        assert_eq!(task.created_by, 42);
        assert!(task.is_ai_assisted);
        assert_eq!(task.status, TaskStatus::Todo);
    }
}
