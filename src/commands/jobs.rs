//! Jobs command: query the job manager's REST API for running jobs.

use crate::config::Config;
use crate::domain::Registry;
use crate::error::AppError;
use crate::ports::{JobManagerApi, JobOverview};

/// Jobs reported for one manuscript.
#[derive(Debug)]
pub struct JobsResult {
    pub name: String,
    pub port: u16,
    pub jobs: Vec<JobOverview>,
}

/// Execute the jobs command.
pub fn execute<A: JobManagerApi>(
    config: &Config,
    api: &A,
    name: &str,
) -> Result<JobsResult, AppError> {
    let registry = Registry::load(&config.registry_path)?;
    let entry =
        registry.get(name).ok_or_else(|| AppError::ManuscriptNotFound(name.to_string()))?;

    let jobs = api.list_jobs(entry.port)?;
    Ok(JobsResult { name: entry.name.clone(), port: entry.port, jobs })
}
