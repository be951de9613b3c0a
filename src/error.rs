//! Crate-level error type.

use crate::schema::ConfigError;

/// Errors that end a simulation run before or outside the iteration loop.
#[derive(Debug, thiserror::Error)]
pub enum SnowfakeError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to allocate lattice buffers for {cells} cells")]
    Allocation { cells: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed configuration file: {0}")]
    Json(#[from] serde_json::Error),
}
