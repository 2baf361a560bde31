/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Open-ended JSON document (`metadata`, `config`). Left untyped on purpose:
/// its interpretation belongs to whatever integration reads it.
pub type JsonDocument = serde_json::Value;
