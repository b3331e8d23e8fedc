//! Repository for the `daily_checkins` table.

use sqlx::{PgConnection, PgPool};
use sprintpilot_core::types::{DbId, Timestamp};

use crate::models::checkin::DailyCheckin;

const COLUMNS: &str = "id, user_id, checked_in_at, created_at";

/// Provides operations for daily check-ins.
pub struct CheckinRepo;

impl CheckinRepo {
    /// Record one check-in event. Repeated same-day check-ins insert
    /// separate rows; streak evaluation collapses them by calendar date.
    pub async fn record(
        conn: &mut PgConnection,
        user_id: DbId,
        checked_in_at: Timestamp,
    ) -> Result<DailyCheckin, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_checkins (user_id, checked_in_at)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DailyCheckin>(&query)
            .bind(user_id)
            .bind(checked_in_at)
            .fetch_one(conn)
            .await
    }

    /// List a user's check-in history, oldest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DailyCheckin>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_checkins WHERE user_id = $1 ORDER BY checked_in_at"
        );
        sqlx::query_as::<_, DailyCheckin>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
