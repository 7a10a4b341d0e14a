use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Keeps the structured writer flushing until the run ends.
pub struct LoggingGuard {
    _guard: Option<WorkerGuard>,
    pub structured_path: Option<PathBuf>,
}

/// Installs the global subscriber: human-readable events on stderr, plus JSON
/// lines in `logging.file` when structured output is enabled. `RUST_LOG`
/// overrides the configured level.
pub fn init_logging(logging: &LoggingConfig, ansi: bool) -> Result<LoggingGuard> {
    let level = logging.level().unwrap_or(Level::WARN);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let stderr_layer = fmt::layer()
        .with_ansi(ansi)
        .with_target(true)
        .with_writer(std::io::stderr);

    let (json_layer, guard, structured_path) = if logging.enable_structured {
        let path = logging.file.clone();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory at {}", dir.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening structured log at {}", path.display()))?;
        let (writer, guard) = non_blocking::NonBlockingBuilder::default()
            .lossy(false)
            .finish(file);
        let layer = fmt::layer()
            .json()
            .with_current_span(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(writer);
        (Some(layer), Some(guard), Some(path))
    } else {
        (None, None, None)
    };

    // A subscriber may already be installed when running under tests.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(json_layer)
        .try_init();

    Ok(LoggingGuard {
        _guard: guard,
        structured_path,
    })
}

pub fn structured_log_path(guard: &LoggingGuard) -> Option<&Path> {
    guard.structured_path.as_deref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_logging_creates_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = LoggingConfig {
            enable_structured: true,
            tracing_level: "info".to_string(),
            file: dir.path().join("nested").join("run.jsonl"),
        };
        let guard = init_logging(&config, false).expect("logging installs");
        assert_eq!(structured_log_path(&guard), Some(config.file.as_path()));
        assert!(config.file.exists());
    }

    #[test]
    fn plain_logging_has_no_file() {
        let guard = init_logging(&LoggingConfig::default(), false).expect("logging installs");
        assert!(structured_log_path(&guard).is_none());
    }
}
