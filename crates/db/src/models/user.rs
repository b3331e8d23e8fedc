//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sprintpilot_core::domain::SubscriptionTier;
use sprintpilot_core::types::{DbId, Timestamp};

use crate::models::status::{StatusId, StatusLookup};

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub tier_id: StatusId,
    pub ai_usage_count: i32,
    pub sprint_duration_weeks: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Resolve the tier lookup id to the domain enum.
    ///
    /// Returns `None` only if the row references a tier id outside the
    /// seeded set, which indicates schema/seed drift.
    pub fn tier(&self) -> Option<SubscriptionTier> {
        SubscriptionTier::from_id(self.tier_id)
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    /// Defaults to `free` if omitted.
    pub tier: Option<SubscriptionTier>,
}
