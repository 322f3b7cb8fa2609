use std::io;

use thiserror::Error;

/// Library-wide error type for manuscript operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Manuscript name is not usable as a network label.
    #[error(
        "Invalid manuscript name '{0}': must be a lowercase DNS label (alphanumerics and hyphens, at most 63 characters, no leading or trailing hyphen)"
    )]
    InvalidName(String),

    /// Manuscript already registered.
    #[error("Manuscript '{0}' already exists. Re-run with --force to regenerate its artifacts.")]
    ManuscriptExists(String),

    /// Manuscript not present in the registry.
    #[error("Manuscript '{0}' not found. Run 'manuscript ls' to see registered manuscripts.")]
    ManuscriptNotFound(String),

    /// Job definition failed validation.
    #[error("Invalid job definition: {0}")]
    InvalidJob(String),

    /// Compose template rendering failed.
    #[error("Failed to render template '{template}': {reason}")]
    TemplateRender { template: String, reason: String },

    /// Compose command exited with an error.
    #[error("Compose error running '{command}': {details}")]
    Compose { command: String, details: String },

    /// Job manager API failure.
    #[error("Job manager API error: {0}")]
    Api(String),

    /// No free TCP port in the probed range.
    #[error("No free port found between {start} and {end}")]
    NoFreePort { start: u16, end: u16 },

    /// Registry file could not be parsed.
    #[error("Registry parse error: {0}")]
    RegistryParse(#[from] toml::de::Error),

    /// Registry file could not be encoded.
    #[error("Registry encode error: {0}")]
    RegistryEncode(#[from] toml::ser::Error),

    /// YAML serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::InvalidName(_)
            | AppError::InvalidJob(_)
            | AppError::TemplateRender { .. }
            | AppError::RegistryParse(_)
            | AppError::RegistryEncode(_)
            | AppError::Yaml(_) => io::ErrorKind::InvalidInput,
            AppError::ManuscriptNotFound(_) => io::ErrorKind::NotFound,
            AppError::ManuscriptExists(_) => io::ErrorKind::AlreadyExists,
            AppError::NoFreePort { .. } => io::ErrorKind::AddrInUse,
            AppError::Compose { .. } | AppError::Api(_) => io::ErrorKind::Other,
        }
    }
}
