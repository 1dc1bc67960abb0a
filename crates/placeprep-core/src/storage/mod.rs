mod config;
pub mod database;

pub use config::{Config, MatchingConfig};
pub use database::{Database, SessionRecord, Stats};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the data directory, creating it if needed.
///
/// `PLACEPREP_DATA_DIR` wins when set. Otherwise `~/.config/placeprep/`,
/// or `~/.config/placeprep-dev/` when `PLACEPREP_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("PLACEPREP_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("PLACEPREP_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("placeprep-dev")
            } else {
                base_dir.join("placeprep")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
