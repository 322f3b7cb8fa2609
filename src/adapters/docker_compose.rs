//! Compose runtime adapter invoking the docker CLI as a subprocess.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use serde::Deserialize;

use crate::error::AppError;
use crate::ports::{ComposeRuntime, ServiceState};

/// `docker compose` invoked as a subprocess.
#[derive(Debug, Clone)]
pub struct DockerComposeCli {
    program: OsString,
}

impl DockerComposeCli {
    pub fn new() -> Self {
        Self { program: OsString::from("docker") }
    }

    /// Use a different executable, for tests.
    pub fn with_program<S: Into<OsString>>(program: S) -> Self {
        Self { program: program.into() }
    }

    fn run(&self, args: &[&str]) -> Result<String, AppError> {
        let output = Command::new(&self.program).args(args).output().map_err(|e| {
            AppError::Compose { command: self.command_line(args), details: e.to_string() }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::Compose {
                command: self.command_line(args),
                details: if stderr.is_empty() { "Unknown error".to_string() } else { stderr },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn command_line(&self, args: &[&str]) -> String {
        format!("{} {}", self.program.to_string_lossy(), args.join(" "))
    }
}

impl Default for DockerComposeCli {
    fn default() -> Self {
        Self::new()
    }
}

/// Row shape of `docker compose ps --format json` (one JSON object per line).
#[derive(Debug, Deserialize)]
struct PsRow {
    #[serde(rename = "Service")]
    service: String,
    #[serde(rename = "State")]
    state: String,
}

impl ComposeRuntime for DockerComposeCli {
    fn up(&self, compose_file: &Path) -> Result<(), AppError> {
        let file = compose_file.to_string_lossy();
        self.run(&["compose", "-f", file.as_ref(), "up", "-d"])?;
        Ok(())
    }

    fn down(&self, compose_file: &Path) -> Result<(), AppError> {
        let file = compose_file.to_string_lossy();
        self.run(&["compose", "-f", file.as_ref(), "down"])?;
        Ok(())
    }

    fn ps(&self, compose_file: &Path) -> Result<Vec<ServiceState>, AppError> {
        let file = compose_file.to_string_lossy();
        let stdout = self.run(&["compose", "-f", file.as_ref(), "ps", "--format", "json"])?;

        let mut states = Vec::new();
        for line in stdout.lines().filter(|line| !line.trim().is_empty()) {
            let row: PsRow = serde_json::from_str(line).map_err(|e| AppError::Compose {
                command: self.command_line(&["compose", "ps"]),
                details: format!("unexpected ps output: {e}"),
            })?;
            states.push(ServiceState { service: row.service, state: row.state });
        }
        Ok(states)
    }

    fn logs(
        &self,
        compose_file: &Path,
        service: Option<&str>,
        follow: bool,
    ) -> Result<(), AppError> {
        let file = compose_file.to_string_lossy();
        let mut args = vec!["compose", "-f", file.as_ref(), "logs"];
        if follow {
            args.push("--follow");
        }
        if let Some(service) = service {
            args.push(service);
        }

        // Logs stream to the user's terminal, so stdio is inherited.
        let status = Command::new(&self.program).args(&args).status().map_err(|e| {
            AppError::Compose { command: self.command_line(&args), details: e.to_string() }
        })?;

        if !status.success() {
            return Err(AppError::Compose {
                command: self.command_line(&args),
                details: format!("exited with {status}"),
            });
        }
        Ok(())
    }
}
