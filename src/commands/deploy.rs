//! Deploy command: launch a manuscript's services via the compose runtime.

use std::path::PathBuf;

use crate::config::Config;
use crate::domain::Registry;
use crate::error::AppError;
use crate::ports::ComposeRuntime;

/// Outcome of a deploy.
#[derive(Debug)]
pub struct DeployResult {
    pub name: String,
    pub port: u16,
    pub compose_file: PathBuf,
}

/// Execute the deploy command.
pub fn execute<R: ComposeRuntime>(
    config: &Config,
    runtime: &R,
    name: &str,
) -> Result<DeployResult, AppError> {
    let registry = Registry::load(&config.registry_path)?;
    let entry =
        registry.get(name).ok_or_else(|| AppError::ManuscriptNotFound(name.to_string()))?;

    let compose_file = entry.dir.join("docker-compose.yml");
    if !compose_file.exists() {
        return Err(AppError::config_error(format!(
            "Compose file not found: {}. Re-run 'manuscript init --name {} --force' to regenerate it.",
            compose_file.display(),
            name
        )));
    }

    runtime.up(&compose_file)?;
    Ok(DeployResult { name: entry.name.clone(), port: entry.port, compose_file })
}
