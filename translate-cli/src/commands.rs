//! Command execution: opens the store and runs one CLI command, writing results to `out`.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use message_store::{
    MessageRepository, MessageStore, SqliteMessageRepository, StaticMessageQuery, StorageError,
};
use tracing::info;
use translate_core::AppConfig;

use crate::cli::Commands;

/// Opens the SQLite repository at `config.database_url` and wraps it in a store.
pub async fn open_store(config: &AppConfig) -> Result<MessageStore> {
    let repo = SqliteMessageRepository::new(&config.database_url)
        .await
        .with_context(|| format!("Open translation database {}", config.database_url))?;
    Ok(MessageStore::new(Arc::new(repo), config.store.clone()))
}

pub async fn execute<W: Write>(command: &Commands, config: &AppConfig, out: &mut W) -> Result<()> {
    let store = open_store(config).await?;
    let repo = store.repository();

    match command {
        Commands::Init => {
            writeln!(out, "Translation tables ready at {}", config.database_url)?;
        }
        Commands::Add { message, category } => {
            match repo.insert_source_message(category, message).await {
                Ok(source) => writeln!(out, "Added #{} [{}] {}", source.id, source.category, source.message)?,
                Err(StorageError::AlreadyExists(_)) => {
                    writeln!(out, "Already exists: [{}] {}", category, message)?
                }
                Err(e) => return Err(e).context("Add source message"),
            }
        }
        Commands::Set {
            message,
            translation,
            category,
            locale,
        } => {
            let source = find_or_insert(&**repo, category, message).await?;
            repo.save_translation(source, locale, translation)
                .await
                .context("Save translation")?;
            info!(source_id = source, locale = %locale, "translation set");
            writeln!(out, "Set #{} [{}] {}: {}", source, locale, message, translation)?;
        }
        Commands::Translate {
            message,
            category,
            locale,
            origin,
        } => {
            let text = store
                .translate_with_origin((*origin).into(), category, message, locale)
                .await
                .context("Translate message")?;
            writeln!(out, "{}", text)?;
        }
        Commands::List {
            locale,
            category,
            json,
        } => {
            let query = StaticMessageQuery {
                categories: category.clone(),
                language: locale.clone(),
            };
            let messages = store.static_messages(&query).await.context("List messages")?;
            if *json {
                serde_json::to_writer_pretty(&mut *out, &messages)?;
                writeln!(out)?;
            } else {
                for m in &messages {
                    let marker = if m.translated { ' ' } else { '*' };
                    writeln!(out, "{}#{} [{}] {} => {}", marker, m.id, m.category, m.key, m.message)?;
                }
            }
        }
        Commands::Stats => {
            let stats = repo.get_stats().await.context("Read stats")?;
            writeln!(out, "Source messages: {}", stats.source_messages)?;
            writeln!(out, "Translations: {}", stats.translations)?;
            writeln!(out, "Categories: {}", stats.categories)?;
            writeln!(out, "Languages: {}", stats.languages)?;
        }
        Commands::Delete { id } => {
            if repo.delete_source_message(*id).await.context("Delete source message")? {
                writeln!(out, "Deleted #{}", id)?;
            } else {
                writeln!(out, "No source message #{}", id)?;
            }
        }
    }

    Ok(())
}

/// Returns the id of the `(category, message)` source row, inserting it if missing.
async fn find_or_insert(repo: &dyn MessageRepository, category: &str, message: &str) -> Result<i64> {
    if let Some(source) = repo.find_source_message(category, message).await? {
        return Ok(source.id);
    }
    match repo.insert_source_message(category, message).await {
        Ok(source) => Ok(source.id),
        Err(e) if e.is_conflict() => repo
            .find_source_message(category, message)
            .await?
            .map(|source| source.id)
            .context("Source message vanished after conflict"),
        Err(e) => Err(e.into()),
    }
}
