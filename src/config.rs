//! Command-line options and persisted settings.

use crate::build_info;
use crate::constants::{DEFAULT_FPS, MAX_FPS, MIN_FPS, SETTINGS_FILE};
use crate::utils::persistence::{load_json_or_default, save_json};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Three-reel fruit machine for the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "bfruit", version = build_info::BUILD_VERSION)]
pub struct Args {
    /// Preferences directory (high score, settings, log)
    #[arg(long, value_name = "DIR")]
    pub pref: Option<PathBuf>,

    /// Start with background music off
    #[arg(long)]
    pub no_music: bool,

    /// Start with sound effects off
    #[arg(long)]
    pub no_sound: bool,

    /// Placing a bet never costs credit
    #[arg(long)]
    pub invincible: bool,

    /// Frames per second; the reels move one step per frame
    #[arg(
        long,
        default_value_t = DEFAULT_FPS,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_FPS)..=i64::from(MAX_FPS))
    )]
    pub fps: u32,

    /// Log filter, e.g. "debug" or "bfruit=trace" (defaults to RUST_LOG, then "info")
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

/// Audio toggles kept between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub music: bool,
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music: true,
            sound: true,
        }
    }
}

impl Settings {
    pub fn load(dir: &Path) -> Self {
        load_json_or_default(dir, SETTINGS_FILE)
    }

    pub fn save(&self, dir: &Path) -> io::Result<()> {
        save_json(dir, SETTINGS_FILE, self)
    }

    /// Command-line switches win over the saved values for this session.
    pub fn with_overrides(self, args: &Args) -> Self {
        Self {
            music: self.music && !args.no_music,
            sound: self.sound && !args.no_sound,
        }
    }
}
