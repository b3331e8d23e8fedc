//! SMALLINT id mapping for lookup-table enums.
//!
//! The domain enums live in `sprintpilot_core`; this module maps each
//! variant to the 1-based SMALLSERIAL id of the corresponding lookup-table
//! seed row. The mapping must match the migration seed order exactly.

use sprintpilot_core::badges::BadgeId;
use sprintpilot_core::domain::{ProjectStatus, SprintStatus, SubscriptionTier, TaskStatus};

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

/// Conversion between a domain enum and its lookup-table row id.
pub trait StatusLookup: Sized {
    /// Return the database lookup-table id.
    fn id(self) -> StatusId;
    /// Resolve a lookup-table id back to the domain variant.
    fn from_id(id: StatusId) -> Option<Self>;
}

macro_rules! impl_status_lookup {
    (
        $name:ty {
            $( $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        impl StatusLookup for $name {
            fn id(self) -> StatusId {
                match self {
                    $( <$name>::$variant => $val, )+
                }
            }

            fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some(<$name>::$variant), )+
                    _ => None,
                }
            }
        }
    };
}

impl_status_lookup! {
    SubscriptionTier {
        Free = 1,
        Pro = 2,
        Enterprise = 3,
    }
}

impl_status_lookup! {
    ProjectStatus {
        Active = 1,
        Paused = 2,
        Completed = 3,
    }
}

impl_status_lookup! {
    SprintStatus {
        Planning = 1,
        Active = 2,
        Completed = 3,
    }
}

impl_status_lookup! {
    TaskStatus {
        Backlog = 1,
        Todo = 2,
        InProgress = 3,
        Review = 4,
        Done = 5,
    }
}

impl_status_lookup! {
    BadgeId {
        GoalHunter = 1,
        SprintWarrior = 2,
        StreakMaster = 3,
        NightOwl = 4,
        EarlyBird = 5,
        PlanningGuru = 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_roundtrip() {
        for id in 1..=5 {
            let status = TaskStatus::from_id(id).unwrap();
            assert_eq!(status.id(), id);
        }
        assert!(TaskStatus::from_id(0).is_none());
        assert!(TaskStatus::from_id(6).is_none());
    }

    #[test]
    fn badge_ids_match_catalog_discriminants() {
        assert_eq!(BadgeId::GoalHunter.id(), 1);
        assert_eq!(BadgeId::PlanningGuru.id(), 6);
        assert_eq!(BadgeId::from_id(3), Some(BadgeId::StreakMaster));
    }
}
