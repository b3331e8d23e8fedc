//! Repository for the `users` table, including the atomic AI quota counter.

use sqlx::PgPool;
use sprintpilot_core::domain::SubscriptionTier;
use sprintpilot_core::types::DbId;

use crate::models::status::StatusLookup;
use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, tier_id, ai_usage_count, \
                        sprint_duration_weeks, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let tier = input.tier.unwrap_or(SubscriptionTier::Free);
        let query = format!(
            "INSERT INTO users (username, email, tier_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(tier.id())
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Change a user's subscription tier.
    ///
    /// Returns `None` if no row with the given `id` exists. The usage
    /// counter is deliberately left untouched: an upgrade lifts the gate
    /// without erasing telemetry, and a downgrade resumes counting from
    /// wherever the counter stood.
    pub async fn set_tier(
        pool: &PgPool,
        id: DbId,
        tier: SubscriptionTier,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET tier_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(tier.id())
            .fetch_optional(pool)
            .await
    }

    /// Change a user's preferred sprint duration (1 or 2 weeks; the CHECK
    /// constraint rejects anything else).
    pub async fn set_sprint_duration(
        pool: &PgPool,
        id: DbId,
        weeks: i16,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET sprint_duration_weeks = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(weeks)
            .fetch_optional(pool)
            .await
    }

    /// Atomically reserve one AI call against the quota.
    ///
    /// The check and the increment are a single statement, so two in-flight
    /// calls for the same user cannot both pass an application-side check
    /// before either increments. Returns the new counter value, or `None`
    /// when the counter already sits at (or above) `limit` — in which case
    /// nothing was mutated.
    pub async fn try_reserve_ai_call(
        pool: &PgPool,
        id: DbId,
        limit: i32,
    ) -> Result<Option<i32>, sqlx::Error> {
        let row: Option<(i32,)> = sqlx::query_as(
            "UPDATE users
             SET ai_usage_count = ai_usage_count + 1, updated_at = NOW()
             WHERE id = $1 AND ai_usage_count < $2
             RETURNING ai_usage_count",
        )
        .bind(id)
        .bind(limit)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(count,)| count))
    }

    /// Release a previously reserved AI call (policy: failed calls don't
    /// count). Clamped at zero so a stray release can never underflow.
    pub async fn release_ai_call(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users
             SET ai_usage_count = GREATEST(ai_usage_count - 1, 0), updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
