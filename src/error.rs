//! Error types shared by the library and the binaries.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading configuration or writing reports.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("failed to read {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A controller could not produce a usable decision.
///
/// The episode treats this as fatal to the agent only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerFault {
    #[error("controller returned no outputs")]
    EmptyOutput,
    #[error("controller returned a non-finite output: {0}")]
    NonFinite(f64),
    #[error("network expects {expected} inputs, got {actual}")]
    InputMismatch { expected: usize, actual: usize },
    #[error("{0}")]
    Other(String),
}
