//! Aggregate statistics for stored messages.
//!
//! Returned by MessageRepository::get_stats.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageStats {
    pub source_messages: i64,
    pub translations: i64,
    pub categories: i64,
    pub languages: i64,
}
