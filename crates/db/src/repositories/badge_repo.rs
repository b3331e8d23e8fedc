//! Repository for the badge catalog and the earned-badge relation.

use sqlx::{PgConnection, PgPool};
use sprintpilot_core::badges::BadgeId;
use sprintpilot_core::types::{DbId, Timestamp};

use crate::models::badge::{Badge, UserBadge};
use crate::models::status::{StatusId, StatusLookup};

/// Provides catalog reads and at-most-once badge grants.
pub struct BadgeRepo;

impl BadgeRepo {
    /// List the full badge catalog in seed (declaration) order.
    pub async fn catalog(pool: &PgPool) -> Result<Vec<Badge>, sqlx::Error> {
        sqlx::query_as::<_, Badge>(
            "SELECT id, slug, name, criteria, icon, badge_type, created_at, updated_at
             FROM badges
             ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    /// List a user's earned badges, oldest grant first.
    pub async fn list_earned(pool: &PgPool, user_id: DbId) -> Result<Vec<UserBadge>, sqlx::Error> {
        sqlx::query_as::<_, UserBadge>(
            "SELECT user_id, badge_id, earned_at
             FROM user_badges
             WHERE user_id = $1
             ORDER BY earned_at, badge_id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Badge ids already earned by a user.
    pub async fn earned_ids(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Vec<BadgeId>, sqlx::Error> {
        let rows: Vec<(StatusId,)> = sqlx::query_as(
            "SELECT badge_id FROM user_badges WHERE user_id = $1 ORDER BY badge_id",
        )
        .bind(user_id)
        .fetch_all(conn)
        .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(id,)| BadgeId::from_id(id))
            .collect())
    }

    /// Grant a set of badges to a user, at most once each.
    ///
    /// `ON CONFLICT DO NOTHING` makes a duplicate grant a no-op, so the
    /// returned list contains exactly the badges that were newly inserted.
    pub async fn grant_many(
        conn: &mut PgConnection,
        user_id: DbId,
        badges: &[BadgeId],
        earned_at: Timestamp,
    ) -> Result<Vec<BadgeId>, sqlx::Error> {
        if badges.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<StatusId> = badges.iter().map(|b| b.id()).collect();
        let rows: Vec<(StatusId,)> = sqlx::query_as(
            "INSERT INTO user_badges (user_id, badge_id, earned_at)
             SELECT $1, unnest($2::smallint[]), $3
             ON CONFLICT DO NOTHING
             RETURNING badge_id",
        )
        .bind(user_id)
        .bind(&ids)
        .bind(earned_at)
        .fetch_all(conn)
        .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(id,)| BadgeId::from_id(id))
            .collect())
    }
}
