//! Shared fakes for unit tests.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::config::Config;
use crate::domain::{RegistryEntry, SinkKind};
use crate::error::AppError;
use crate::ports::{ComposeRuntime, ServiceState};

/// Compose runtime that records calls instead of spawning processes.
#[derive(Debug, Default)]
pub(crate) struct RecordingRuntime {
    pub calls: RefCell<Vec<String>>,
    pub ps_states: Vec<ServiceState>,
    pub fail_with: Option<String>,
}

impl RecordingRuntime {
    fn record(&self, call: String) -> Result<(), AppError> {
        self.calls.borrow_mut().push(call.clone());
        match &self.fail_with {
            Some(details) => {
                Err(AppError::Compose { command: call, details: details.clone() })
            }
            None => Ok(()),
        }
    }
}

impl ComposeRuntime for RecordingRuntime {
    fn up(&self, compose_file: &Path) -> Result<(), AppError> {
        self.record(format!("up {}", compose_file.display()))
    }

    fn down(&self, compose_file: &Path) -> Result<(), AppError> {
        self.record(format!("down {}", compose_file.display()))
    }

    fn ps(&self, compose_file: &Path) -> Result<Vec<ServiceState>, AppError> {
        self.record(format!("ps {}", compose_file.display()))?;
        Ok(self.ps_states.clone())
    }

    fn logs(
        &self,
        compose_file: &Path,
        service: Option<&str>,
        follow: bool,
    ) -> Result<(), AppError> {
        self.record(format!(
            "logs {} service={} follow={follow}",
            compose_file.display(),
            service.unwrap_or("-")
        ))
    }
}

pub(crate) fn test_config(root: &Path) -> Config {
    Config {
        manuscripts_root: root.join("manuscripts"),
        registry_path: root.join("registry.toml"),
    }
}

pub(crate) fn registry_entry(name: &str, dir: PathBuf, port: u16) -> RegistryEntry {
    RegistryEntry {
        name: name.to_string(),
        dir,
        port,
        sink: SinkKind::Console,
        db_port: None,
        graphql_port: None,
        database: None,
        created_at: Utc::now(),
    }
}
