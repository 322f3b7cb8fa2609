//! Stop command: tear down a manuscript's services.

use crate::config::Config;
use crate::domain::Registry;
use crate::error::AppError;
use crate::ports::ComposeRuntime;

/// Execute the stop command.
pub fn execute<R: ComposeRuntime>(
    config: &Config,
    runtime: &R,
    name: &str,
) -> Result<(), AppError> {
    let registry = Registry::load(&config.registry_path)?;
    let entry =
        registry.get(name).ok_or_else(|| AppError::ManuscriptNotFound(name.to_string()))?;

    runtime.down(&entry.dir.join("docker-compose.yml"))
}
