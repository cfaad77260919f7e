//! Message store crate: database-backed message translations with missing-message recording.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – SourceMessage, Translation, StaticMessage, StaticMessageQuery, MessageStats
//! - [`repository`] – MessageRepository trait
//! - [`sqlite_repo`] – SqliteMessageRepository (SQLite)
//! - [`inmemory_repo`] – InMemoryMessageRepository
//! - [`sqlite_pool`] – SqlitePoolManager
//! - [`store`] – MessageStore: translate with fallback, record misses, static message query

mod error;
mod inmemory_repo;
mod models;
mod repository;
mod sqlite_pool;
mod sqlite_repo;
mod store;


pub use error::StorageError;
pub use inmemory_repo::InMemoryMessageRepository;
pub use models::{MessageStats, SourceMessage, StaticMessage, StaticMessageQuery, Translation};
pub use repository::MessageRepository;
pub use sqlite_pool::SqlitePoolManager;
pub use sqlite_repo::SqliteMessageRepository;
pub use store::{MessageStore, RecordOutcome, SkipReason};
pub use translate_core::{RequestOrigin, StoreSettings};
