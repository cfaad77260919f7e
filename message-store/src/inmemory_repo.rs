//! # In-Memory Message Repository
//!
//! [`MessageRepository`] kept in process memory, for tests and for hosts that seed messages at
//! startup and do not need persistence.
//!
//! ## Thread Safety
//!
//! State sits behind `Arc<RwLock<>>`. The existence check and the insert of
//! `insert_source_message` run under one write lock, so concurrent inserts of the same
//! `(category, message)` produce one row and [`StorageError::AlreadyExists`] for the rest.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::models::{MessageStats, SourceMessage, StaticMessage, StaticMessageQuery, Translation};
use crate::repository::MessageRepository;

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    sources: BTreeMap<i64, SourceMessage>,
    /// (category, message) -> id
    index: HashMap<(String, String), i64>,
    translations: HashMap<(i64, String), Translation>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored source messages.
    pub async fn len(&self) -> usize {
        self.state.read().await.sources.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn find_source_message(
        &self,
        category: &str,
        message: &str,
    ) -> Result<Option<SourceMessage>, StorageError> {
        let state = self.state.read().await;
        let key = (category.to_string(), message.to_string());
        Ok(state
            .index
            .get(&key)
            .and_then(|id| state.sources.get(id))
            .cloned())
    }

    async fn insert_source_message(
        &self,
        category: &str,
        message: &str,
    ) -> Result<SourceMessage, StorageError> {
        let mut state = self.state.write().await;
        let key = (category.to_string(), message.to_string());
        if state.index.contains_key(&key) {
            return Err(StorageError::AlreadyExists(format!(
                "source message {:?} in category {:?}",
                message, category
            )));
        }

        state.next_id += 1;
        let record = SourceMessage::new(state.next_id, key.0.clone(), key.1.clone());
        state.index.insert(key, record.id);
        state.sources.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_translation(
        &self,
        source_id: i64,
        language: &str,
    ) -> Result<Option<Translation>, StorageError> {
        let state = self.state.read().await;
        Ok(state
            .translations
            .get(&(source_id, language.to_string()))
            .cloned())
    }

    async fn save_translation(
        &self,
        source_id: i64,
        language: &str,
        translation: &str,
    ) -> Result<Translation, StorageError> {
        let mut state = self.state.write().await;
        if !state.sources.contains_key(&source_id) {
            return Err(StorageError::NotFound(format!("source message {}", source_id)));
        }

        let record = Translation {
            source_id,
            language: language.to_string(),
            translation: translation.to_string(),
            date_updated: Utc::now(),
        };
        state
            .translations
            .insert((source_id, language.to_string()), record.clone());
        Ok(record)
    }

    async fn list_static_messages(
        &self,
        query: &StaticMessageQuery,
    ) -> Result<Vec<StaticMessage>, StorageError> {
        let state = self.state.read().await;
        let mut messages: Vec<StaticMessage> = state
            .sources
            .values()
            .filter(|s| query.categories.is_empty() || query.categories.contains(&s.category))
            .map(|s| {
                let translation = state
                    .translations
                    .get(&(s.id, query.language.clone()))
                    .map(|t| t.translation.clone());
                StaticMessage::resolve(
                    s.id,
                    s.category.clone(),
                    s.message.clone(),
                    translation,
                    &query.language,
                )
            })
            .collect();

        // sources iterate by id already; a stable sort keeps that inside each category
        messages.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(messages)
    }

    async fn delete_source_message(&self, id: i64) -> Result<bool, StorageError> {
        let mut state = self.state.write().await;
        let Some(record) = state.sources.remove(&id) else {
            return Ok(false);
        };
        state.index.remove(&(record.category, record.message));
        state.translations.retain(|(source_id, _), _| *source_id != id);
        Ok(true)
    }

    async fn get_stats(&self) -> Result<MessageStats, StorageError> {
        let state = self.state.read().await;
        let mut categories: Vec<&str> = state.sources.values().map(|s| s.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        let mut languages: Vec<&str> = state.translations.keys().map(|(_, l)| l.as_str()).collect();
        languages.sort_unstable();
        languages.dedup();

        Ok(MessageStats {
            source_messages: state.sources.len() as i64,
            translations: state.translations.len() as i64,
            categories: categories.len() as i64,
            languages: languages.len() as i64,
        })
    }
}
