//! Error taxonomy for the generator.
//!
//! Conflicts with existing artifacts are not errors: they surface as
//! [`ArtifactStatus::Skipped`](crate::generator::ArtifactStatus) outcomes or as
//! an aborted generation after a declined overwrite.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Errors terminating a generator command.
///
/// A generation step renders all of its artifacts before writing any of
/// them, so rendering and validation errors leave that step's files
/// untouched. Writes already made are not rolled back: an I/O failure
/// mid-commit, or a failure in a later step of a chained command such as
/// `crud`, leaves the earlier files on disk.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A required generator parameter is missing or blank.
    #[error("missing required parameter: {0}")]
    UserInput(String),

    /// A table referenced by the command is absent from the schema.
    #[error("table '{0}' was not found in the schema")]
    Schema(String),

    /// The model an artifact depends on has not been generated yet.
    #[error("model '{model}' was not found at {path}")]
    MissingModel { model: String, path: PathBuf },

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// The schema snapshot could not be read or parsed.
    #[error("invalid schema snapshot in {path}: {message}")]
    SchemaFile { path: PathBuf, message: String },

    /// A shared file lacks the anchor a patch needs.
    #[error("cannot patch {path}: {message}")]
    Patch { path: PathBuf, message: String },

    /// A template failed to render.
    #[error("failed to render {artifact}: {source}")]
    Render {
        artifact: String,
        #[source]
        source: askama::Error,
    },

    /// A filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The confirmation prompt could not be answered.
    #[error("prompt failed: {0}")]
    Prompt(String),
}

impl GeneratorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GeneratorError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn render(artifact: impl Into<String>, source: askama::Error) -> Self {
        GeneratorError::Render {
            artifact: artifact.into(),
            source,
        }
    }
}
