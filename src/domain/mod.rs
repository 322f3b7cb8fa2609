//! Core value types: manuscript configuration, job definition, registry.

mod job;
mod manuscript;
mod registry;

pub use job::{JobDefinition, Sink, Source, Transform};
pub use manuscript::{
    DEFAULT_DB_PORT, DEFAULT_GRAPHQL_IMAGE, DEFAULT_GRAPHQL_PORT, DEFAULT_PORT, Manuscript,
    NODE_IMAGE, PostgresSink, SinkKind,
};
pub use registry::{Registry, RegistryEntry};
