//! Job definition consumed by the external runtime (`manuscript.yaml`).

use serde::{Deserialize, Serialize};

use crate::domain::SinkKind;
use crate::error::AppError;

/// Spec version written into freshly generated definitions.
pub const SPEC_VERSION: &str = "v0.1.0";

/// The job definition document mounted into the jobmanager container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobDefinition {
    pub name: String,
    #[serde(rename = "specVersion")]
    pub spec_version: String,
    pub parallelism: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transforms: Vec<Transform>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sinks: Vec<Sink>,
}

/// A dataset the job reads from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub dataset: String,
    /// Event-time column, required by the window source variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timecol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// A named SQL transformation over sources or earlier transforms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub name: String,
    pub sql: String,
}

/// Destination for a transform's output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sink {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
}

impl JobDefinition {
    /// Minimal runnable definition for a fresh manuscript: one dataset
    /// source, one pass-through transform, one sink.
    pub fn skeleton(name: &str, dataset: &str, sink: SinkKind, database: Option<&str>) -> Self {
        let table = dataset.rsplit('.').next().unwrap_or(dataset).to_string();
        let transform_name = format!("{name}_transform");

        let sink = match sink {
            SinkKind::Console => Sink {
                name: format!("{name}_sink"),
                kind: "console".to_string(),
                from: transform_name.clone(),
                database: None,
                schema: None,
                table: None,
                primary_key: None,
            },
            SinkKind::Postgres => Sink {
                name: format!("{name}_sink"),
                kind: "postgres".to_string(),
                from: transform_name.clone(),
                database: Some(database.unwrap_or(name).to_string()),
                schema: Some("public".to_string()),
                table: Some(table.clone()),
                primary_key: None,
            },
        };

        JobDefinition {
            name: name.to_string(),
            spec_version: SPEC_VERSION.to_string(),
            parallelism: 1,
            sources: vec![Source {
                name: table.clone(),
                kind: "dataset".to_string(),
                dataset: dataset.to_string(),
                timecol: None,
                step: None,
                slide: None,
                size: None,
            }],
            transforms: vec![Transform {
                name: transform_name,
                sql: format!("SELECT * FROM {table}"),
            }],
            sinks: vec![sink],
        }
    }

    /// Enforce the required-field rules of the external runtime.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.is_empty() {
            return Err(AppError::InvalidJob("Missing required field: name".to_string()));
        }
        if self.spec_version.is_empty() {
            return Err(AppError::InvalidJob("Missing required field: specVersion".to_string()));
        }
        if self.parallelism == 0 {
            return Err(AppError::InvalidJob("parallelism must be at least 1".to_string()));
        }

        for source in &self.sources {
            require_source(&source.name, "name")?;
            require_source(&source.kind, "type")?;
            require_source(&source.dataset, "dataset")?;

            match source.kind.as_str() {
                "dataset" | "lookup_dataset" => {}
                "cumulative_window_dataset" => {
                    require_window(source, &[("timecol", &source.timecol), ("step", &source.step), ("size", &source.size)])?;
                }
                "hop_window_dataset" => {
                    require_window(source, &[("timecol", &source.timecol), ("slide", &source.slide), ("size", &source.size)])?;
                }
                "tumble_window_dataset" => {
                    require_window(source, &[("timecol", &source.timecol), ("size", &source.size)])?;
                }
                other => {
                    return Err(AppError::InvalidJob(format!("Unsupported source: {other}")));
                }
            }
        }

        for transform in &self.transforms {
            if transform.name.is_empty() {
                return Err(AppError::InvalidJob(
                    "Missing required field in transform: name".to_string(),
                ));
            }
            if transform.sql.is_empty() {
                return Err(AppError::InvalidJob(
                    "Missing required field in transform: sql".to_string(),
                ));
            }
        }

        for sink in &self.sinks {
            for (field, value) in
                [("name", &sink.name), ("type", &sink.kind), ("from", &sink.from)]
            {
                if value.is_empty() {
                    return Err(AppError::InvalidJob(format!(
                        "Missing required field in sink: {field}"
                    )));
                }
            }
        }

        Ok(())
    }
}

fn require_source(value: &str, field: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::InvalidJob(format!("Missing required field in source: {field}")));
    }
    Ok(())
}

fn require_window(source: &Source, fields: &[(&str, &Option<String>)]) -> Result<(), AppError> {
    for (field, value) in fields {
        if value.is_none() {
            return Err(AppError::InvalidJob(format!(
                "Missing required field in source '{}': {field}",
                source.name
            )));
        }
    }
    Ok(())
}
