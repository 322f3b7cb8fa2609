//! Manuscript configuration: the parameter set consumed by the renderer.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Default exposed port of the job manager UI.
pub const DEFAULT_PORT: u16 = 8081;
/// Default host port for the Postgres sidecar.
pub const DEFAULT_DB_PORT: u16 = 15432;
/// Default host port for the GraphQL sidecar.
pub const DEFAULT_GRAPHQL_PORT: u16 = 8082;

/// Image running the jobmanager and taskmanager services.
pub const NODE_IMAGE: &str = "repository.chainbase.com/manuscript-node/manuscript-node:v1.3.0";
/// Default image for the GraphQL sidecar.
pub const DEFAULT_GRAPHQL_IMAGE: &str = "hasura/graphql-engine:latest";

/// Where the manuscript writes its output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    Console,
    Postgres,
}

impl SinkKind {
    pub const ALL: [SinkKind; 2] = [SinkKind::Console, SinkKind::Postgres];

    pub fn parse(value: &str) -> Option<SinkKind> {
        match value {
            "console" => Some(SinkKind::Console),
            "postgres" | "postgresql" => Some(SinkKind::Postgres),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SinkKind::Console => "console",
            SinkKind::Postgres => "postgres",
        }
    }
}

/// Parameter set for one manuscript deployment.
///
/// Constructed once per CLI invocation, consumed by the renderer, discarded
/// after the compose file is written.
#[derive(Clone, Debug)]
pub struct Manuscript {
    pub name: String,
    pub port: u16,
    pub checkpoint_dir: String,
    pub savepoint_dir: String,
    pub log_dir: String,
    pub postgres: Option<PostgresSink>,
}

/// Parameters for the Postgres + GraphQL sidecar pair.
#[derive(Clone, Debug)]
pub struct PostgresSink {
    pub db_port: u16,
    pub database: String,
    pub graphql_image: String,
    pub graphql_port: u16,
}

impl Manuscript {
    /// Compose network label derived from the name.
    pub fn network_name(&self) -> String {
        format!("ms_network_{}", self.name)
    }

    /// Validate the record before rendering.
    pub fn validate(&self) -> Result<(), AppError> {
        if !is_network_label(&self.name) {
            return Err(AppError::InvalidName(self.name.clone()));
        }
        if self.port == 0 {
            return Err(AppError::config_error("port must be nonzero"));
        }
        if let Some(pg) = &self.postgres {
            if pg.db_port == 0 || pg.graphql_port == 0 {
                return Err(AppError::config_error("sidecar ports must be nonzero"));
            }
            if pg.database.is_empty() {
                return Err(AppError::config_error("database name must not be empty"));
            }
            if pg.graphql_image.is_empty() {
                return Err(AppError::config_error("GraphQL image must not be empty"));
            }
            let ports = [self.port, pg.db_port, pg.graphql_port];
            for i in 0..ports.len() {
                for j in (i + 1)..ports.len() {
                    if ports[i] == ports[j] {
                        return Err(AppError::config_error(format!(
                            "port {} is used more than once",
                            ports[i]
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// A name is usable as a compose network label when it is a DNS label.
fn is_network_label(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 63
        && name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !name.starts_with('-')
        && !name.ends_with('-')
}
