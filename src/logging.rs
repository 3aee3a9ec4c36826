//! Tracing setup: a compact stdout layer plus a non-blocking file layer.
//!
//! The file target comes from [`Config::log_file`](crate::config::Config::log_file) and defaults
//! to `logs/docsum.log`. Missing parent directories are created; if the file still cannot be
//! opened the server keeps running with stdout logging only.
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::Config;

const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_LOG_FILE: &str = "docsum.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber. `RUST_LOG` controls filtering and defaults to `info`.
pub fn init_tracing(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(false).compact();

    let path = log_file_path(config.log_file.as_deref());
    let (file_layer, open_error) = match open_log_file(&path) {
        Ok(file) => {
            let layer = fmt::layer()
                .with_writer(non_blocking_writer(file))
                .with_target(true)
                .with_ansi(false)
                .compact();
            (Some(layer), None)
        }
        Err(error) => (None, Some(error)),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    match open_error {
        Some(error) => {
            tracing::warn!(path = %path.display(), %error, "File logging disabled");
        }
        None => tracing::debug!(path = %path.display(), "File logging enabled"),
    }
}

fn log_file_path(configured: Option<&Path>) -> PathBuf {
    configured
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Path::new(DEFAULT_LOG_DIR).join(DEFAULT_LOG_FILE))
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn non_blocking_writer(file: File) -> NonBlocking {
    let (writer, guard) = tracing_appender::non_blocking(file);
    let _ = LOG_GUARD.set(guard);
    writer
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_path_lives_under_logs_dir() {
        assert_eq!(log_file_path(None), PathBuf::from("logs/docsum.log"));
        assert_eq!(
            log_file_path(Some(Path::new("/tmp/custom.log"))),
            PathBuf::from("/tmp/custom.log")
        );
    }

    #[test]
    fn opening_creates_parent_dirs_and_appends() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("docsum.log");

        open_log_file(&path)
            .expect("open")
            .write_all(b"first\n")
            .expect("write");
        open_log_file(&path)
            .expect("reopen")
            .write_all(b"second\n")
            .expect("write");

        let contents = std::fs::read_to_string(&path).expect("read");
        assert_eq!(contents, "first\nsecond\n");
    }
}
