//! Badge re-evaluation, run at the tail of every mutating operation.

use sqlx::{PgConnection, PgPool};
use sprintpilot_core::badges::{evaluate_badges, BadgeId};
use sprintpilot_core::types::{DbId, Timestamp};
use sprintpilot_db::repositories::{BadgeRepo, SnapshotRepo};

use crate::error::EngineResult;

/// Re-evaluate badge rules over a fresh snapshot and grant whatever newly
/// crossed its threshold.
///
/// Runs on the caller's connection so the snapshot read, the triggering
/// mutation, and the grant all commit together. Granting is at-most-once
/// (`ON CONFLICT DO NOTHING`), so racing evaluations can't double-award.
pub async fn refresh_badges(
    conn: &mut PgConnection,
    user_id: DbId,
    now: Timestamp,
) -> Result<Vec<BadgeId>, sqlx::Error> {
    let snapshot = SnapshotRepo::load(&mut *conn, user_id).await?;
    let newly_earned = evaluate_badges(&snapshot);
    if newly_earned.is_empty() {
        return Ok(Vec::new());
    }
    let granted = BadgeRepo::grant_many(&mut *conn, user_id, &newly_earned, now).await?;
    if !granted.is_empty() {
        tracing::info!(user_id, badges = granted.len(), "Granted new badges");
    }
    Ok(granted)
}

/// Standalone badge re-check outside any other mutation, e.g. a backfill
/// after a rules change.
pub async fn recheck_badges(
    pool: &PgPool,
    user_id: DbId,
    now: Timestamp,
) -> EngineResult<Vec<BadgeId>> {
    let mut tx = pool.begin().await?;
    let granted = refresh_badges(&mut *tx, user_id, now).await?;
    tx.commit().await?;
    Ok(granted)
}
