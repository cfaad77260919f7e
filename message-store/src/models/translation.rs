//! Translation of one source message into one language.
//!
//! Maps to the `message_translation` table; at most one row per `(source_id, language)`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Translation {
    pub source_id: i64,
    pub language: String,
    pub translation: String,
    pub date_updated: DateTime<Utc>,
}
