//! Location of the persisted session file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use coffeeshop_store::FileStore;

/// Overrides the data directory; used by tests and portable installs.
pub const DATA_DIR_ENV: &str = "COFFEESHOP_DATA_DIR";

/// Get the session file path.
fn session_path() -> Result<PathBuf> {
    let data_dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => ProjectDirs::from("", "", "coffeeshop")
            .context("Could not determine data directory")?
            .data_dir()
            .to_path_buf(),
    };

    fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Open the file store holding the `token` and `user` entries.
pub fn open_store() -> Result<FileStore> {
    Ok(FileStore::new(session_path()?))
}
