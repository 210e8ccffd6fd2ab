//! Error types for configuration validation and per-target processing.

use std::path::PathBuf;

use thiserror::Error;

use crate::minify::MinifyError;

/// Configuration errors that abort the whole run before any file is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("outDir is not valid: {0:?}")]
    OutDirInvalid(String),

    #[error("no targets configured")]
    NoTargets,
}

/// Failures while processing a single target.
///
/// A `TargetError` is logged and skipped; it never aborts the batch.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Minify(#[from] MinifyError),
}
