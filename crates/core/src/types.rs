/// Primary key type for every entity table (PostgreSQL BIGSERIAL).
pub type DbId = i64;

/// Instant type used throughout the workspace; always UTC.
///
/// Badge rules truncate these to calendar dates / hours-of-day with
/// chrono's naive accessors, so one consistent zone per evaluation is all
/// the determinism contract needs.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
