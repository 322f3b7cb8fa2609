//! Embedded compose document skeletons.

/// Skeleton without the database sidecar.
pub static COMPOSE: &str = include_str!("templates/compose.yml.j2");

/// Skeleton with the Postgres + GraphQL sidecar pair.
pub static COMPOSE_POSTGRES: &str = include_str!("templates/compose_postgres.yml.j2");
