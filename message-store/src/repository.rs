use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{MessageStats, SourceMessage, StaticMessage, StaticMessageQuery, Translation};

/// Storage behind a [`MessageStore`](crate::MessageStore).
///
/// `category` and `message` comparisons must be byte-exact and case-sensitive regardless of the
/// backend's default collation.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn find_source_message(
        &self,
        category: &str,
        message: &str,
    ) -> Result<Option<SourceMessage>, StorageError>;

    /// Inserts a new source message. Fails with [`StorageError::AlreadyExists`] when the
    /// `(category, message)` pair is already stored, including when a concurrent insert won.
    async fn insert_source_message(
        &self,
        category: &str,
        message: &str,
    ) -> Result<SourceMessage, StorageError>;

    async fn find_translation(
        &self,
        source_id: i64,
        language: &str,
    ) -> Result<Option<Translation>, StorageError>;

    /// Creates or replaces the translation for `(source_id, language)`. Fails with
    /// [`StorageError::NotFound`] when the source message does not exist.
    async fn save_translation(
        &self,
        source_id: i64,
        language: &str,
        translation: &str,
    ) -> Result<Translation, StorageError>;

    async fn list_static_messages(
        &self,
        query: &StaticMessageQuery,
    ) -> Result<Vec<StaticMessage>, StorageError>;

    /// Deletes a source message and its translations. Returns false if no such id.
    async fn delete_source_message(&self, id: i64) -> Result<bool, StorageError>;

    async fn get_stats(&self) -> Result<MessageStats, StorageError>;
}
