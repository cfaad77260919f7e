//! SQLite message repository: source messages and their translations.
//!
//! Uses SqlitePoolManager and the models (SourceMessage, Translation, StaticMessage, MessageStats).
//! Both key columns are declared `COLLATE BINARY` under a `UNIQUE (category, message)` constraint,
//! and lookups repeat the collation, so distinct casings never merge.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::{MessageStats, SourceMessage, StaticMessage, StaticMessageQuery, Translation};
use crate::repository::MessageRepository;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SqliteMessageRepository {
    pool_manager: SqlitePoolManager,
}

impl SqliteMessageRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        Self::from_pool_manager(pool_manager).await
    }

    /// Wraps an existing pool and creates the schema if needed.
    pub async fn from_pool_manager(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating translation tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS source_message (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL COLLATE BINARY,
                message TEXT NOT NULL COLLATE BINARY,
                uid TEXT NOT NULL,
                date_created TEXT NOT NULL,
                UNIQUE (category, message)
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS message_translation (
                source_id INTEGER NOT NULL REFERENCES source_message(id) ON DELETE CASCADE,
                language TEXT NOT NULL,
                translation TEXT NOT NULL,
                date_updated TEXT NOT NULL,
                PRIMARY KEY (source_id, language)
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_source_message_category ON source_message(category);
            CREATE INDEX IF NOT EXISTS idx_message_translation_language ON message_translation(language);
            "#,
        )
        .execute(pool)
        .await?;

        info!("Translation tables created successfully");
        Ok(())
    }

    /// Returns the pool manager, e.g. to share the pool with the host application.
    pub fn pool_manager(&self) -> &SqlitePoolManager {
        &self.pool_manager
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn find_source_message(
        &self,
        category: &str,
        message: &str,
    ) -> Result<Option<SourceMessage>, StorageError> {
        let pool = self.pool_manager.pool();

        let source = sqlx::query_as::<_, SourceMessage>(
            r#"
            SELECT id, category, message, uid, date_created
            FROM source_message
            WHERE category = ? COLLATE BINARY AND message = ? COLLATE BINARY
            "#,
        )
        .bind(category)
        .bind(message)
        .fetch_optional(pool)
        .await?;

        Ok(source)
    }

    async fn insert_source_message(
        &self,
        category: &str,
        message: &str,
    ) -> Result<SourceMessage, StorageError> {
        let pool = self.pool_manager.pool();
        let mut record = SourceMessage::new(0, category.to_string(), message.to_string());

        let result = sqlx::query(
            r#"
            INSERT INTO source_message (category, message, uid, date_created)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&record.category)
        .bind(&record.message)
        .bind(&record.uid)
        .bind(record.date_created)
        .execute(pool)
        .await?;

        record.id = result.last_insert_rowid();
        info!(
            "Saved source message: id={}, category={}, message={}",
            record.id, record.category, record.message
        );
        Ok(record)
    }

    async fn find_translation(
        &self,
        source_id: i64,
        language: &str,
    ) -> Result<Option<Translation>, StorageError> {
        let pool = self.pool_manager.pool();

        let translation = sqlx::query_as::<_, Translation>(
            r#"
            SELECT source_id, language, translation, date_updated
            FROM message_translation
            WHERE source_id = ? AND language = ?
            "#,
        )
        .bind(source_id)
        .bind(language)
        .fetch_optional(pool)
        .await?;

        Ok(translation)
    }

    async fn save_translation(
        &self,
        source_id: i64,
        language: &str,
        translation: &str,
    ) -> Result<Translation, StorageError> {
        let pool = self.pool_manager.pool();
        let record = Translation {
            source_id,
            language: language.to_string(),
            translation: translation.to_string(),
            date_updated: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO message_translation (source_id, language, translation, date_updated)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (source_id, language) DO UPDATE SET
                translation = excluded.translation,
                date_updated = excluded.date_updated
            "#,
        )
        .bind(record.source_id)
        .bind(&record.language)
        .bind(&record.translation)
        .bind(record.date_updated)
        .execute(pool)
        .await?;

        info!(
            "Saved translation: source_id={}, language={}",
            record.source_id, record.language
        );
        Ok(record)
    }

    async fn list_static_messages(
        &self,
        query: &StaticMessageQuery,
    ) -> Result<Vec<StaticMessage>, StorageError> {
        let pool = self.pool_manager.pool();
        let mut sql = String::from(
            r#"
            SELECT s.id, s.category, s.message, t.translation
            FROM source_message s
            LEFT JOIN message_translation t ON t.source_id = s.id AND t.language = ?
            WHERE 1=1
            "#,
        );

        if !query.categories.is_empty() {
            let placeholders = vec!["?"; query.categories.len()].join(", ");
            sql.push_str(&format!(" AND s.category IN ({})", placeholders));
        }

        sql.push_str(" ORDER BY s.category, s.id");

        let mut query_builder =
            sqlx::query_as::<_, (i64, String, String, Option<String>)>(&sql).bind(&query.language);
        for category in &query.categories {
            query_builder = query_builder.bind(category);
        }

        let rows = query_builder.fetch_all(pool).await?;
        debug!(
            "Retrieved {} static messages for language {}",
            rows.len(),
            query.language
        );

        Ok(rows
            .into_iter()
            .map(|(id, category, key, translation)| {
                StaticMessage::resolve(id, category, key, translation, &query.language)
            })
            .collect())
    }

    async fn delete_source_message(&self, id: i64) -> Result<bool, StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query("DELETE FROM source_message WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        info!("Deleted source message: id={}", id);
        Ok(result.rows_affected() > 0)
    }

    async fn get_stats(&self) -> Result<MessageStats, StorageError> {
        let pool = self.pool_manager.pool();

        let source_messages: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM source_message")
            .fetch_one(pool)
            .await?;

        let translations: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM message_translation")
            .fetch_one(pool)
            .await?;

        let categories: (i64,) =
            sqlx::query_as("SELECT COUNT(DISTINCT category) FROM source_message")
                .fetch_one(pool)
                .await?;

        let languages: (i64,) =
            sqlx::query_as("SELECT COUNT(DISTINCT language) FROM message_translation")
                .fetch_one(pool)
                .await?;

        Ok(MessageStats {
            source_messages: source_messages.0,
            translations: translations.0,
            categories: categories.0,
            languages: languages.0,
        })
    }
}
