//! Store settings and application config, loaded from environment variables.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TranslateError};

/// Category managed when `TRANSLATE_CATEGORIES` is not set.
pub const DEFAULT_CATEGORY: &str = "site";

/// Settings consumed by the message store. Read-only for the lifetime of a store handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Categories the store records missing messages for. Order kept, duplicates dropped.
    pub managed_categories: Vec<String>,
    /// Persist source messages that had no translation.
    pub record_missing_translations: bool,
    /// Only record misses coming from public site requests.
    pub record_only_for_site_requests: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            managed_categories: vec![DEFAULT_CATEGORY.to_string()],
            record_missing_translations: false,
            record_only_for_site_requests: false,
        }
    }
}

impl StoreSettings {
    /// Settings managing the given categories, with recording disabled.
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut managed_categories: Vec<String> = Vec::new();
        for category in categories {
            let category = category.into();
            if !managed_categories.contains(&category) {
                managed_categories.push(category);
            }
        }
        Self {
            managed_categories,
            record_missing_translations: false,
            record_only_for_site_requests: false,
        }
    }

    pub fn with_record_missing(mut self, enabled: bool) -> Self {
        self.record_missing_translations = enabled;
        self
    }

    pub fn with_site_requests_only(mut self, enabled: bool) -> Self {
        self.record_only_for_site_requests = enabled;
        self
    }

    /// Exact, case-sensitive membership test.
    pub fn is_managed(&self, category: &str) -> bool {
        self.managed_categories.iter().any(|c| c == category)
    }

    /// Loads store settings from `TRANSLATE_CATEGORIES`, `TRANSLATE_RECORD_MISSING` and
    /// `TRANSLATE_RECORD_SITE_ONLY`.
    pub fn from_env() -> Result<Self> {
        let categories = match env::var("TRANSLATE_CATEGORIES") {
            Ok(raw) => parse_categories(&raw)?,
            Err(_) => vec![DEFAULT_CATEGORY.to_string()],
        };
        let record_missing = env_bool("TRANSLATE_RECORD_MISSING", false)?;
        let site_only = env_bool("TRANSLATE_RECORD_SITE_ONLY", false)?;

        Ok(Self::new(categories)
            .with_record_missing(record_missing)
            .with_site_requests_only(site_only))
    }
}

/// Application config for the CLI and embedding hosts.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub log_file: String,
    pub store: StoreSettings,
}

impl AppConfig {
    /// Loads config from the environment. `database_url` overrides `DATABASE_URL` when given.
    pub fn load(database_url: Option<String>) -> Result<Self> {
        let database_url = database_url.unwrap_or_else(|| {
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://translations.db".to_string())
        });
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/translate.log".to_string());
        let store = StoreSettings::from_env()?;

        Ok(Self {
            database_url,
            log_file,
            store,
        })
    }
}

/// Splits a comma-separated category list. Entries are trimmed; blanks are ignored.
pub fn parse_categories(raw: &str) -> Result<Vec<String>> {
    let categories: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    if categories.is_empty() {
        return Err(TranslateError::Config(
            "TRANSLATE_CATEGORIES must name at least one category".to_string(),
        ));
    }
    Ok(categories)
}

fn env_bool(key: &str, default: bool) -> Result<bool> {
    match env::var(key) {
        Ok(raw) => parse_bool(&raw)
            .ok_or_else(|| TranslateError::Config(format!("{} is not a boolean: {:?}", key, raw))),
        Err(_) => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
