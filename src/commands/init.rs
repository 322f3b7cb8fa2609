//! Init command: generate the job definition, the compose document, and the
//! registry entry for a new manuscript.

use std::fs;
use std::net::TcpListener;
use std::path::PathBuf;

use chrono::Utc;
use dialoguer::{Input, Select};

use crate::compose;
use crate::config::Config;
use crate::domain::{
    DEFAULT_DB_PORT, DEFAULT_GRAPHQL_IMAGE, DEFAULT_GRAPHQL_PORT, DEFAULT_PORT, JobDefinition,
    Manuscript, PostgresSink, Registry, RegistryEntry, SinkKind,
};
use crate::error::AppError;

/// How many ports past the default to probe before giving up.
const PORT_SCAN_SPAN: u16 = 100;

/// Options for the init command. Unset fields are gathered interactively.
#[derive(Debug, Default)]
pub struct InitOptions {
    pub name: Option<String>,
    pub dataset: Option<String>,
    pub sink: Option<String>,
    pub port: Option<u16>,
    pub db_port: Option<u16>,
    pub graphql_port: Option<u16>,
    pub database: Option<String>,
    /// Overwrite the artifacts of an existing manuscript.
    pub force: bool,
}

/// Artifacts produced by init.
#[derive(Debug)]
pub struct InitResult {
    pub name: String,
    pub dir: PathBuf,
    pub port: u16,
    pub sink: SinkKind,
}

/// Execute the init command.
pub fn execute(config: &Config, options: InitOptions) -> Result<InitResult, AppError> {
    let name = match options.name {
        Some(name) => name,
        None => prompt_name()?,
    };
    let dataset = match options.dataset {
        Some(dataset) => dataset,
        None => prompt_dataset()?,
    };
    let sink = match &options.sink {
        Some(value) => SinkKind::parse(value).ok_or_else(|| {
            AppError::config_error(format!("Unknown sink '{value}': expected console or postgres"))
        })?,
        None => prompt_sink()?,
    };

    let mut registry = Registry::load(&config.registry_path)?;
    if registry.get(&name).is_some() && !options.force {
        return Err(AppError::ManuscriptExists(name));
    }

    let port = resolve_port(options.port, DEFAULT_PORT, &[])?;
    let postgres = match sink {
        SinkKind::Console => None,
        SinkKind::Postgres => {
            let db_port = resolve_port(options.db_port, DEFAULT_DB_PORT, &[port])?;
            let graphql_port =
                resolve_port(options.graphql_port, DEFAULT_GRAPHQL_PORT, &[port, db_port])?;
            let database =
                options.database.unwrap_or_else(|| name.replace('-', "_"));
            Some(PostgresSink {
                db_port,
                database,
                graphql_image: DEFAULT_GRAPHQL_IMAGE.to_string(),
                graphql_port,
            })
        }
    };

    let dir = config.manuscript_dir(&name);
    let manuscript = Manuscript {
        name: name.clone(),
        port,
        checkpoint_dir: dir.join("checkpoint").display().to_string(),
        savepoint_dir: dir.join("savepoint").display().to_string(),
        log_dir: dir.join("log").display().to_string(),
        postgres,
    };
    manuscript.validate()?;

    let job = JobDefinition::skeleton(
        &name,
        &dataset,
        sink,
        manuscript.postgres.as_ref().map(|pg| pg.database.as_str()),
    );
    job.validate()?;

    // Render before touching the filesystem so a bad configuration leaves
    // nothing behind.
    let document = compose::render(&manuscript)?;

    for subdir in ["checkpoint", "savepoint", "log"] {
        fs::create_dir_all(dir.join(subdir))?;
    }
    fs::write(dir.join("manuscript.yaml"), serde_yaml::to_string(&job)?)?;
    fs::write(dir.join("docker-compose.yml"), document)?;

    registry.upsert(RegistryEntry {
        name: name.clone(),
        dir: dir.clone(),
        port,
        sink,
        db_port: manuscript.postgres.as_ref().map(|pg| pg.db_port),
        graphql_port: manuscript.postgres.as_ref().map(|pg| pg.graphql_port),
        database: manuscript.postgres.as_ref().map(|pg| pg.database.clone()),
        created_at: Utc::now(),
    });
    registry.save(&config.registry_path)?;

    Ok(InitResult { name, dir, port, sink })
}

fn resolve_port(requested: Option<u16>, start: u16, taken: &[u16]) -> Result<u16, AppError> {
    match requested {
        Some(port) => Ok(port),
        None => next_free_port(start, taken),
    }
}

/// Probe for a free TCP port on the loopback interface, starting at `start`.
fn next_free_port(start: u16, taken: &[u16]) -> Result<u16, AppError> {
    let end = start.saturating_add(PORT_SCAN_SPAN);
    for port in start..end {
        if taken.contains(&port) {
            continue;
        }
        if TcpListener::bind(("127.0.0.1", port)).is_ok() {
            return Ok(port);
        }
    }
    Err(AppError::NoFreePort { start, end })
}

fn prompt_name() -> Result<String, AppError> {
    Input::<String>::new()
        .with_prompt("Manuscript name")
        .interact_text()
        .map_err(|e| AppError::config_error(format!("Name prompt failed: {e}")))
}

fn prompt_dataset() -> Result<String, AppError> {
    Input::<String>::new()
        .with_prompt("Dataset to read from (e.g. zkevm.blocks)")
        .interact_text()
        .map_err(|e| AppError::config_error(format!("Dataset prompt failed: {e}")))
}

fn prompt_sink() -> Result<SinkKind, AppError> {
    let items: Vec<&str> = SinkKind::ALL.iter().map(|kind| kind.label()).collect();
    let selection = Select::new()
        .with_prompt("Select sink")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| AppError::config_error(format!("Sink selection failed: {e}")))?;
    Ok(SinkKind::ALL[selection])
}
