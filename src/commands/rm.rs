//! Rm command: deregister a manuscript, optionally deleting its directory.

use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::domain::Registry;
use crate::error::AppError;

/// Outcome of removing a manuscript.
#[derive(Debug)]
pub struct RmResult {
    pub name: String,
    pub dir: PathBuf,
    pub purged: bool,
}

/// Execute the rm command.
pub fn execute(config: &Config, name: &str, purge: bool) -> Result<RmResult, AppError> {
    let mut registry = Registry::load(&config.registry_path)?;
    let entry = registry
        .get(name)
        .ok_or_else(|| AppError::ManuscriptNotFound(name.to_string()))?
        .clone();

    registry.remove(name);
    registry.save(&config.registry_path)?;

    let purged = purge && entry.dir.exists();
    if purged {
        fs::remove_dir_all(&entry.dir)?;
    }

    Ok(RmResult { name: entry.name, dir: entry.dir, purged })
}
