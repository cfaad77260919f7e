//! Source message model for persistence.
//!
//! Maps to the `source_message` table. `(category, message)` is unique under byte-exact,
//! case-sensitive comparison.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SourceMessage {
    pub id: i64,
    pub category: String,
    pub message: String,
    pub uid: String,
    pub date_created: DateTime<Utc>,
}

impl SourceMessage {
    /// Creates a record with the given storage id, a fresh UUID and the current timestamp.
    pub fn new(id: i64, category: String, message: String) -> Self {
        Self {
            id,
            category,
            message,
            uid: Uuid::new_v4().to_string(),
            date_created: Utc::now(),
        }
    }
}
