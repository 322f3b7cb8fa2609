//! manuscript: generate and operate Docker Compose deployments of manuscript
//! ETL jobs on an external stream-processing runtime.

pub mod adapters;
pub mod commands;
pub mod compose;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use chrono::{DateTime, Utc};

use adapters::{DockerComposeCli, HttpJobManagerClient};
use commands::{deploy, init, jobs, list, logs, rm, stop};
use config::Config;

pub use commands::init::{InitOptions, InitResult};
pub use commands::jobs::JobsResult;
pub use commands::list::ListRow;
pub use commands::rm::RmResult;
pub use error::AppError;

/// Create a new manuscript: job definition, compose document, registry entry.
pub fn init(options: InitOptions) -> Result<InitResult, AppError> {
    let config = Config::new_default()?;
    let result = init::execute(&config, options)?;

    println!("✅ Created manuscript '{}' at {}", result.name, result.dir.display());
    println!("   Run 'manuscript deploy {}' to launch it", result.name);
    Ok(result)
}

/// Launch a manuscript's services.
pub fn deploy(name: &str) -> Result<(), AppError> {
    let config = Config::new_default()?;
    let runtime = DockerComposeCli::new();
    let result = deploy::execute(&config, &runtime, name)?;

    println!("✅ Deployed manuscript '{}'", result.name);
    println!("   Job manager UI: http://127.0.0.1:{}", result.port);
    Ok(())
}

/// Stop a manuscript's services.
pub fn stop(name: &str) -> Result<(), AppError> {
    let config = Config::new_default()?;
    let runtime = DockerComposeCli::new();
    stop::execute(&config, &runtime, name)?;

    println!("✅ Stopped manuscript '{name}'");
    Ok(())
}

/// List registered manuscripts and their container state.
pub fn list() -> Result<Vec<ListRow>, AppError> {
    let config = Config::new_default()?;
    let runtime = DockerComposeCli::new();
    let rows = list::execute(&config, &runtime)?;

    if rows.is_empty() {
        println!("No manuscripts registered. Run 'manuscript init' to create one.");
        return Ok(rows);
    }

    println!(
        "{:<24} {:<7} {:<10} {:<14} {:<18} DIR",
        "NAME", "PORT", "SINK", "STATE", "CREATED"
    );
    for row in &rows {
        println!(
            "{:<24} {:<7} {:<10} {:<14} {:<18} {}",
            row.name,
            row.port,
            row.sink.label(),
            row.state,
            row.created_at.format("%Y-%m-%d %H:%M").to_string(),
            row.dir.display()
        );
    }
    Ok(rows)
}

/// Stream service logs for a manuscript.
pub fn logs(name: &str, service: Option<&str>, follow: bool) -> Result<(), AppError> {
    let config = Config::new_default()?;
    let runtime = DockerComposeCli::new();
    logs::execute(&config, &runtime, name, service, follow)
}

/// Show the jobs running on a manuscript's job manager.
pub fn jobs(name: &str) -> Result<JobsResult, AppError> {
    let config = Config::new_default()?;
    let api = HttpJobManagerClient::new()?;
    let result = jobs::execute(&config, &api, name)?;

    if result.jobs.is_empty() {
        println!("No jobs reported by the job manager on port {}", result.port);
        return Ok(result);
    }

    println!("{:<34} {:<24} {:<12} STARTED", "JOB ID", "NAME", "STATE");
    for job in &result.jobs {
        let started = DateTime::<Utc>::from_timestamp_millis(job.start_time)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<34} {:<24} {:<12} {started}", job.id, job.name, job.state);
    }
    Ok(result)
}

/// Deregister a manuscript, optionally deleting its directory.
pub fn remove(name: &str, purge: bool) -> Result<RmResult, AppError> {
    let config = Config::new_default()?;
    let result = rm::execute(&config, name, purge)?;

    if result.purged {
        println!("✅ Removed manuscript '{}' and deleted {}", result.name, result.dir.display());
    } else {
        println!("✅ Removed manuscript '{}' (directory kept)", result.name);
    }
    Ok(result)
}
