//! Preferences-directory helpers: JSON settings and the plain-integer high
//! score file.

use crate::constants::{APP_NAME, DEFAULT_HIGH_SCORE, SCORE_FILE};
use crate::slot::HighScoreStore;
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Platform config directory for the game, created if needed.
pub fn default_pref_dir() -> io::Result<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", APP_NAME).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine config directory",
        )
    })?;
    let dir = project_dirs.config_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Use `dir` if given (creating it), else the platform default.
pub fn resolve_pref_dir(dir: Option<&Path>) -> io::Result<PathBuf> {
    match dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            Ok(dir.to_path_buf())
        }
        None => default_pref_dir(),
    }
}

/// Load a JSON file from `dir`, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(
    dir: &Path,
    filename: &str,
) -> T {
    match fs::read_to_string(dir.join(filename)) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
            warn!(file = filename, error = %err, "ignoring unreadable settings");
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON in `dir`.
pub fn save_json<T: serde::Serialize>(dir: &Path, filename: &str, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(dir.join(filename), json)
}

/// High score stored as a bare decimal integer in `<dir>/score`.
#[derive(Debug, Clone)]
pub struct FileHighScore {
    path: PathBuf,
}

impl FileHighScore {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(SCORE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScore {
    /// Missing or garbled files read as the default score of 1.
    fn load(&self) -> u32 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    warn!(path = %self.path.display(), error = %err, "could not read high score");
                }
                return DEFAULT_HIGH_SCORE;
            }
        };
        text.trim().parse().unwrap_or_else(|err| {
            warn!(path = %self.path.display(), error = %err, "high score file is not a number");
            DEFAULT_HIGH_SCORE
        })
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        fs::write(&self.path, score.to_string())
    }
}
