//! Logs command: stream service logs for a manuscript.

use crate::config::Config;
use crate::domain::Registry;
use crate::error::AppError;
use crate::ports::ComposeRuntime;

/// Execute the logs command.
pub fn execute<R: ComposeRuntime>(
    config: &Config,
    runtime: &R,
    name: &str,
    service: Option<&str>,
    follow: bool,
) -> Result<(), AppError> {
    let registry = Registry::load(&config.registry_path)?;
    let entry =
        registry.get(name).ok_or_else(|| AppError::ManuscriptNotFound(name.to_string()))?;

    runtime.logs(&entry.dir.join("docker-compose.yml"), service, follow)
}
