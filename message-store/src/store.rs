//! MessageStore: resolves `(category, message, locale)` against the repository and records
//! messages that had no translation so an editor can translate them later.
//!
//! The read path propagates storage failures. The recording path never does: conflicts and
//! failures are logged and dropped, and the caller still gets the source text.

use std::sync::Arc;

use tracing::{debug, info, warn};
use translate_core::{RequestOrigin, StoreSettings};

use crate::error::StorageError;
use crate::models::{SourceMessage, StaticMessage, StaticMessageQuery};
use crate::repository::MessageRepository;

/// Why a miss was not recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    RecordingDisabled,
    NotSiteRequest,
    EmptyMessage,
    UnmanagedCategory,
}

/// Result of the missing-translation recording path. None of these is an error for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Skipped(SkipReason),
    /// The source message was already stored.
    AlreadyKnown,
    Recorded(SourceMessage),
    /// A concurrent call inserted the same source message first.
    Conflict,
    /// Storage failed; logged and discarded.
    Failed,
}

/// Cheap to clone; clones share the repository.
#[derive(Clone)]
pub struct MessageStore {
    repository: Arc<dyn MessageRepository>,
    settings: Arc<StoreSettings>,
}

impl MessageStore {
    pub fn new(repository: Arc<dyn MessageRepository>, settings: StoreSettings) -> Self {
        Self {
            repository,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    pub fn repository(&self) -> &Arc<dyn MessageRepository> {
        &self.repository
    }

    /// Returns a store on the same repository with `settings` replacing the current ones.
    /// Existing handles keep their settings.
    pub fn reconfigure(&self, settings: StoreSettings) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            settings: Arc::new(settings),
        }
    }

    /// Translates a message for a public site request.
    pub async fn translate(
        &self,
        category: &str,
        message: &str,
        locale: &str,
    ) -> Result<String, StorageError> {
        self.translate_with_origin(RequestOrigin::Site, category, message, locale)
            .await
    }

    /// Returns the stored translation, or `message` unchanged when there is none.
    ///
    /// On a miss the recording path runs once before returning. An empty `message` is returned
    /// as is, without touching storage.
    pub async fn translate_with_origin(
        &self,
        origin: RequestOrigin,
        category: &str,
        message: &str,
        locale: &str,
    ) -> Result<String, StorageError> {
        if message.is_empty() {
            return Ok(String::new());
        }

        if let Some(source) = self.repository.find_source_message(category, message).await? {
            if let Some(translation) = self.repository.find_translation(source.id, locale).await? {
                return Ok(translation.translation);
            }
        }

        debug!(category, locale, message, "missing translation");
        self.record_missing_translation(category, message, origin)
            .await;
        Ok(message.to_string())
    }

    /// Stores `message` as a new source message if every guard passes and it is not stored yet.
    ///
    /// Guards, in order: recording enabled; site request when recording is limited to site
    /// requests; non-empty message; managed category.
    pub async fn record_missing_translation(
        &self,
        category: &str,
        message: &str,
        origin: RequestOrigin,
    ) -> RecordOutcome {
        if let Some(reason) = self.skip_reason(category, message, origin) {
            return RecordOutcome::Skipped(reason);
        }

        match self.repository.find_source_message(category, message).await {
            Ok(Some(_)) => return RecordOutcome::AlreadyKnown,
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, category, "failed to look up missing translation");
                return RecordOutcome::Failed;
            }
        }

        match self.repository.insert_source_message(category, message).await {
            Ok(source) => {
                info!(id = source.id, category, "recorded missing translation");
                RecordOutcome::Recorded(source)
            }
            Err(e) if e.is_conflict() => {
                debug!(category, "missing translation already recorded concurrently");
                RecordOutcome::Conflict
            }
            Err(e) => {
                warn!(error = %e, category, "failed to record missing translation");
                RecordOutcome::Failed
            }
        }
    }

    /// Lists known source messages with translations resolved for `query.language`.
    pub async fn static_messages(
        &self,
        query: &StaticMessageQuery,
    ) -> Result<Vec<StaticMessage>, StorageError> {
        self.repository.list_static_messages(query).await
    }

    fn skip_reason(&self, category: &str, message: &str, origin: RequestOrigin) -> Option<SkipReason> {
        let settings = &self.settings;
        if !settings.record_missing_translations {
            Some(SkipReason::RecordingDisabled)
        } else if settings.record_only_for_site_requests && !origin.is_site_request() {
            Some(SkipReason::NotSiteRequest)
        } else if message.is_empty() {
            Some(SkipReason::EmptyMessage)
        } else if !settings.is_managed(category) {
            Some(SkipReason::UnmanagedCategory)
        } else {
            None
        }
    }
}

impl std::fmt::Debug for MessageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageStore")
            .field("settings", &self.settings)
            .finish()
    }
}
