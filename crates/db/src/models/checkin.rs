//! Daily check-in model.

use serde::Serialize;
use sqlx::FromRow;
use sprintpilot_core::types::{DbId, Timestamp};

/// A check-in row from the `daily_checkins` table.
///
/// Several rows per calendar day are permitted; streak evaluation collapses
/// them to distinct dates.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyCheckin {
    pub id: DbId,
    pub user_id: DbId,
    pub checked_in_at: Timestamp,
    pub created_at: Timestamp,
}
