//! Errors reported by the CLI.

use std::io;

use thiserror::Error;

use archmap::ArchmapError;

use crate::config::ConfigError;

/// Everything that can stop an `archmap` run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Archmap(#[from] ArchmapError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to parse schema document: {0}")]
    Schema(String),

    #[error("Unknown service `{0}`")]
    UnknownService(String),

    #[error("Unknown system `{0}`")]
    UnknownSystem(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
