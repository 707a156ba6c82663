//! CLI error types.

use std::path::PathBuf;

use inject_config::ConfigError;
use inject_directives::{InjectError, RegistrationError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Registration(#[from] RegistrationError),

    #[error("{0}")]
    Inject(#[from] InjectError),
}
