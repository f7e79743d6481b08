/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Primary key of a row in `users`; note authors and requesters use it.
pub type UserId = DbId;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
