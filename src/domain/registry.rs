//! Persistent registry of manuscripts created by this tool.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::SinkKind;
use crate::error::AppError;

/// One registered manuscript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub name: String,
    pub dir: PathBuf,
    pub port: u16,
    pub sink: SinkKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphql_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// All manuscripts known to this installation, stored as TOML.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default, rename = "manuscript")]
    pub manuscripts: Vec<RegistryEntry>,
}

impl Registry {
    /// Load the registry; a missing file is an empty registry.
    pub fn load(path: &Path) -> Result<Registry, AppError> {
        if !path.exists() {
            return Ok(Registry::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Write the registry, creating the parent directory on demand.
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.manuscripts.iter().find(|entry| entry.name == name)
    }

    /// Insert an entry, replacing any existing entry with the same name.
    pub fn upsert(&mut self, entry: RegistryEntry) {
        self.manuscripts.retain(|existing| existing.name != entry.name);
        self.manuscripts.push(entry);
    }

    /// Remove an entry by name; returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.manuscripts.len();
        self.manuscripts.retain(|entry| entry.name != name);
        self.manuscripts.len() != before
    }
}
