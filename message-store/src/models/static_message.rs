//! Static message listing: every known source message of some categories with its
//! translation resolved for one language.
//!
//! Used by MessageStore::static_messages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticMessageQuery {
    /// Categories to include. Empty means all categories.
    pub categories: Vec<String>,
    pub language: String,
}

impl StaticMessageQuery {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            categories: Vec::new(),
            language: language.into(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticMessage {
    pub id: i64,
    pub category: String,
    /// The source text.
    pub key: String,
    /// Translation for `language`, or the source text when there is none.
    pub message: String,
    pub language: String,
    pub translated: bool,
}

impl StaticMessage {
    /// Resolves a listing row; falls back to the source text when `translation` is `None`.
    pub fn resolve(
        id: i64,
        category: String,
        key: String,
        translation: Option<String>,
        language: &str,
    ) -> Self {
        let translated = translation.is_some();
        let message = translation.unwrap_or_else(|| key.clone());
        Self {
            id,
            category,
            key,
            message,
            language: language.to_string(),
            translated,
        }
    }
}
