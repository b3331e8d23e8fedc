//! Badge catalog row and earned-badge relation models.

use serde::Serialize;
use sqlx::FromRow;
use sprintpilot_core::types::{DbId, Timestamp};

use crate::models::status::StatusId;

/// A badge catalog row from the `badges` table.
///
/// The table is seeded once by migration and matches the static catalog in
/// `sprintpilot_core::badges`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Badge {
    pub id: StatusId,
    pub slug: String,
    pub name: String,
    pub criteria: String,
    pub icon: String,
    pub badge_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An earned-badge row from the `user_badges` relation. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserBadge {
    pub user_id: DbId,
    pub badge_id: StatusId,
    pub earned_at: Timestamp,
}
