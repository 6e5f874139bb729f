//! Utility modules: preferences-directory persistence.

pub mod persistence;

pub use persistence::{
    default_pref_dir, load_json_or_default, resolve_pref_dir, save_json, FileHighScore,
};
