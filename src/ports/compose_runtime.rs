use std::path::Path;

use crate::error::AppError;

/// Container state for one compose service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceState {
    pub service: String,
    pub state: String,
}

/// Abstraction over the container-orchestration CLI.
pub trait ComposeRuntime {
    /// Start the services defined by the compose file, detached.
    fn up(&self, compose_file: &Path) -> Result<(), AppError>;

    /// Stop and remove the services.
    fn down(&self, compose_file: &Path) -> Result<(), AppError>;

    /// Current service states; empty when nothing is running.
    fn ps(&self, compose_file: &Path) -> Result<Vec<ServiceState>, AppError>;

    /// Stream service logs to the terminal.
    fn logs(
        &self,
        compose_file: &Path,
        service: Option<&str>,
        follow: bool,
    ) -> Result<(), AppError>;
}
