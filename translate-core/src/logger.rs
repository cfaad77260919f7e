//! Tracing for the translate CLI and embedding hosts.
//!
//! Events always go to the log file so recorded misses and swallowed storage failures leave a
//! trail. Console output is optional: `translate list --json` must keep stdout parseable.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::{
        format::FmtSpan,
        writer::{BoxMakeWriter, MakeWriterExt},
    },
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use crate::error::{Result, TranslateError};

/// Where log lines are written besides the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Log file and stdout.
    FileAndStdout,
    /// Log file only.
    FileOnly,
}

/// Installs the global tracing subscriber writing to `log_file_path` and, unless
/// [`LogOutput::FileOnly`], stdout.
///
/// The filter comes from `RUST_LOG` (e.g. `message_store=debug` to see every lookup miss) and
/// defaults to `info`. Load `.env` first or a `RUST_LOG` set there is ignored.
pub fn init_tracing(log_file_path: &str, output: LogOutput) -> Result<()> {
    let file = Arc::new(open_log_file(log_file_path)?);
    let writer = match output {
        LogOutput::FileAndStdout => BoxMakeWriter::new(io::stdout.and(file)),
        LogOutput::FileOnly => BoxMakeWriter::new(file),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_ansi(output == LogOutput::FileAndStdout);

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TranslateError::Logger(format!("Failed to set global subscriber: {}", e)))
}

/// Opens the log file for appending, creating missing parent directories.
fn open_log_file(log_file_path: &str) -> Result<File> {
    if let Some(parent) = Path::new(log_file_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    Ok(OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("translate.log");

        open_log_file(path.to_str().unwrap()).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_appends() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translate.log");
        let path_str = path.to_str().unwrap();

        writeln!(open_log_file(path_str).unwrap(), "first").unwrap();
        writeln!(open_log_file(path_str).unwrap(), "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_init_tracing_file_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("translate.log");

        // Another test may have installed a subscriber already; the file must exist either way.
        let _ = init_tracing(path.to_str().unwrap(), LogOutput::FileOnly);

        assert!(path.exists());
    }
}
