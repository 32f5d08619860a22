use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

const LOG_FILE_NAME: &str = "retail-directory.log";

/// Resolves the log file: the configured path, or the user cache directory.
pub fn log_path(config: &LoggingConfig) -> PathBuf {
    config.file.clone().unwrap_or_else(|| {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("retail-directory")
            .join(LOG_FILE_NAME)
    })
}

/// Initialize tracing to a log file.
///
/// The TUI owns the terminal, so nothing is written to stdout or stderr.
/// `RUST_LOG` overrides the configured level. Returns the file in use.
pub fn init_logging(config: &LoggingConfig) -> io::Result<PathBuf> {
    let path = log_path(config);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(&path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_file_wins() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            file: Some(PathBuf::from("/tmp/custom.log")),
        };
        assert_eq!(log_path(&config), PathBuf::from("/tmp/custom.log"));
    }

    #[test]
    fn default_file_lives_under_app_dir() {
        let path = log_path(&LoggingConfig::default());
        assert!(path.ends_with("retail-directory/retail-directory.log"));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("app.log");
        let config = LoggingConfig {
            level: "info".to_string(),
            file: Some(file.clone()),
        };
        assert_eq!(init_logging(&config).unwrap(), file);
        assert!(file.exists());
    }
}
