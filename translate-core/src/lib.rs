//! # translate-core
//!
//! Shared pieces for the message store workspace: [`StoreSettings`] and [`AppConfig`] loaded
//! from the environment, the [`RequestOrigin`] of a translation request, error types, and
//! tracing initialization. Storage-agnostic; used by message-store and translate-cli.

pub mod error;
pub mod logger;
pub mod settings;
pub mod types;

pub use error::{Result, TranslateError};
pub use logger::{init_tracing, LogOutput};
pub use settings::{AppConfig, StoreSettings};
pub use types::RequestOrigin;
