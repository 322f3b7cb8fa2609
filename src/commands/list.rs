//! List command: registry entries and their container state.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::domain::{Registry, SinkKind};
use crate::error::AppError;
use crate::ports::ComposeRuntime;

/// One row of `manuscript ls` output.
#[derive(Debug)]
pub struct ListRow {
    pub name: String,
    pub port: u16,
    pub sink: SinkKind,
    pub dir: PathBuf,
    pub created_at: DateTime<Utc>,
    pub state: String,
}

/// Execute the list command.
pub fn execute<R: ComposeRuntime>(config: &Config, runtime: &R) -> Result<Vec<ListRow>, AppError> {
    let registry = Registry::load(&config.registry_path)?;

    let mut rows = Vec::with_capacity(registry.manuscripts.len());
    for entry in &registry.manuscripts {
        let compose_file = entry.dir.join("docker-compose.yml");
        let state = if compose_file.exists() {
            // An unreachable runtime should not make listing fatal.
            match runtime.ps(&compose_file) {
                Ok(states) if states.is_empty() => "stopped".to_string(),
                Ok(states) => {
                    let running =
                        states.iter().filter(|s| s.state == "running").count();
                    format!("{running}/{} running", states.len())
                }
                Err(_) => "unknown".to_string(),
            }
        } else {
            "missing".to_string()
        };

        rows.push(ListRow {
            name: entry.name.clone(),
            port: entry.port,
            sink: entry.sink,
            dir: entry.dir.clone(),
            created_at: entry.created_at,
            state,
        });
    }
    Ok(rows)
}
