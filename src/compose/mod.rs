//! Compose document rendering: substitute a manuscript configuration into
//! one of the embedded skeletons.

mod templates;

use std::sync::OnceLock;

use minijinja::{Environment, UndefinedBehavior, Value, context};

use crate::domain::{Manuscript, NODE_IMAGE};
use crate::error::AppError;

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Render the compose document for a manuscript.
///
/// Selects the skeleton variant from the sink configuration. Rendering is
/// deterministic: identical input produces byte-identical output.
pub fn render(manuscript: &Manuscript) -> Result<String, AppError> {
    manuscript.validate()?;

    match &manuscript.postgres {
        Some(pg) => render_template(
            "compose_postgres",
            templates::COMPOSE_POSTGRES,
            context! {
                name => manuscript.name,
                port => manuscript.port,
                node_image => NODE_IMAGE,
                checkpoint_dir => manuscript.checkpoint_dir,
                savepoint_dir => manuscript.savepoint_dir,
                log_dir => manuscript.log_dir,
                db_port => pg.db_port,
                database => pg.database,
                graphql_image => pg.graphql_image,
                graphql_port => pg.graphql_port,
            },
        ),
        None => render_template(
            "compose",
            templates::COMPOSE,
            context! {
                name => manuscript.name,
                port => manuscript.port,
                node_image => NODE_IMAGE,
                checkpoint_dir => manuscript.checkpoint_dir,
                savepoint_dir => manuscript.savepoint_dir,
                log_dir => manuscript.log_dir,
            },
        ),
    }
}

fn render_template(name: &str, source: &str, ctx: Value) -> Result<String, AppError> {
    let env = ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env
    });

    env.render_str(source, ctx).map_err(|err| AppError::TemplateRender {
        template: name.to_string(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DEFAULT_GRAPHQL_IMAGE, PostgresSink};

    fn manuscript() -> Manuscript {
        Manuscript {
            name: "demo".to_string(),
            port: 8081,
            checkpoint_dir: "/data/demo/checkpoint".to_string(),
            savepoint_dir: "/data/demo/savepoint".to_string(),
            log_dir: "/data/demo/log".to_string(),
            postgres: None,
        }
    }

    fn manuscript_with_postgres() -> Manuscript {
        let mut ms = manuscript();
        ms.postgres = Some(PostgresSink {
            db_port: 15432,
            database: "demo_db".to_string(),
            graphql_image: DEFAULT_GRAPHQL_IMAGE.to_string(),
            graphql_port: 8082,
        });
        ms
    }

    #[test]
    fn rendering_is_deterministic() {
        let ms = manuscript_with_postgres();
        assert_eq!(render(&ms).unwrap(), render(&ms).unwrap());
    }

    #[test]
    fn plain_variant_maps_port_and_network() {
        let doc = render(&manuscript()).unwrap();
        assert!(doc.contains("ms_network_demo"));
        assert!(doc.contains("\"8081:8081\""));
        assert!(doc.contains("- /data/demo/checkpoint:/opt/flink/checkpoint"));
        assert!(!doc.contains("postgres"));
        assert!(!doc.contains("hasura"));
    }

    #[test]
    fn postgres_variant_includes_both_sidecar_services() {
        let doc = render(&manuscript_with_postgres()).unwrap();
        assert!(doc.contains("postgres:"));
        assert!(doc.contains("hasura:"));
        assert!(doc.contains("\"15432:5432\""));
        assert!(doc.contains("\"8082:8080\""));
        assert!(doc.contains("postgres:5432/demo_db"));
    }

    #[test]
    fn network_label_is_consistent_everywhere() {
        for doc in [render(&manuscript()).unwrap(), render(&manuscript_with_postgres()).unwrap()] {
            for line in doc.lines().filter(|line| line.contains("ms_network_")) {
                assert!(
                    line.trim().trim_start_matches("- ").trim_end_matches(':')
                        == "ms_network_demo",
                    "inconsistent network label in line: {line}"
                );
            }
        }
    }

    #[test]
    fn both_variants_parse_as_yaml() {
        for ms in [manuscript(), manuscript_with_postgres()] {
            let doc = render(&ms).unwrap();
            let value: serde_yaml::Value = serde_yaml::from_str(&doc).expect("valid YAML");
            let services = value.get("services").expect("services section");
            assert!(services.get("jobmanager").is_some());
            assert!(services.get("taskmanager").is_some());
        }
    }

    #[test]
    fn missing_template_variable_fails() {
        let err = render_template("broken", "hello {{ missing }}", context! {})
            .expect_err("strict undefined should reject missing variables");
        assert!(matches!(err, AppError::TemplateRender { .. }));
    }

    #[test]
    fn invalid_name_fails_before_rendering() {
        let mut ms = manuscript();
        ms.name = "Not A Label".to_string();
        assert!(matches!(render(&ms), Err(AppError::InvalidName(_))));
    }
}
