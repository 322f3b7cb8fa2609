//! Application configuration: where manuscripts and the registry live.

use std::path::PathBuf;

use crate::error::AppError;

/// Application-wide configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory under which manuscript directories are created.
    pub manuscripts_root: PathBuf,
    /// Path to the registry file.
    pub registry_path: PathBuf,
}

impl Config {
    /// Create configuration from the environment.
    ///
    /// Manuscripts live under `$HOME/manuscripts` (overridable via
    /// `MANUSCRIPT_HOME`); the registry lives under `$HOME/.config/manuscript`
    /// for consistency across platforms and tests.
    pub fn new_default() -> Result<Self, AppError> {
        let home = std::env::var("HOME")
            .map_err(|_| AppError::config_error("HOME environment variable not set"))?;
        let home = PathBuf::from(home);

        let manuscripts_root = match std::env::var_os("MANUSCRIPT_HOME") {
            Some(dir) => PathBuf::from(dir),
            None => home.join("manuscripts"),
        };
        let registry_path = home.join(".config").join("manuscript").join("registry.toml");

        Ok(Self { manuscripts_root, registry_path })
    }

    /// Directory for a single manuscript.
    pub fn manuscript_dir(&self, name: &str) -> PathBuf {
        self.manuscripts_root.join(name)
    }
}
