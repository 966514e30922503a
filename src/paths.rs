//! Path resolution for trivia data.
//!
//! Follows the XDG base directory layout.

use std::env;
use std::path::PathBuf;

/// Directory name under the XDG data home.
const APP_DIR: &str = "trivia";

/// Get XDG-compliant data directory for trivia.
///
/// Uses `$XDG_DATA_HOME/trivia` when set, otherwise `~/.local/share/trivia`.
/// Falls back to a relative `.local/share/trivia` when neither variable is set.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_default()
                .join(".local/share")
        });

    data_home.join(APP_DIR)
}

/// Get database file path (data_dir/trivia.db).
pub fn get_db_path() -> PathBuf {
    get_data_dir().join("trivia.db")
}
