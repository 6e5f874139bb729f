//! Tracing setup. The terminal belongs to the game screen, so log lines go to
//! a file in the preferences directory.

use crate::constants::LOG_FILE;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Build the filter: explicit `level` first, then `RUST_LOG`, then `info`.
pub fn build_filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    }
}

/// Append log lines to `<dir>/bfruit.log`. Returns the log path.
pub fn init_file_logging(dir: &Path, level: Option<&str>) -> io::Result<PathBuf> {
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    Ok(path)
}

/// Log to stderr, for the command-line tools.
pub fn init_stderr_logging(level: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_logging_creates_log() {
        let tmp = tempfile::tempdir().unwrap();
        let path = init_file_logging(tmp.path(), Some("debug")).expect("first init succeeds");
        tracing::info!("hello from the test");
        assert!(path.exists());
        assert!(path.ends_with(LOG_FILE));
    }
}
