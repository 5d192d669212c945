//! Error types for extension project state and serving.

use std::path::PathBuf;

use thiserror::Error;

use crate::messages;

/// Errors raised while reading, writing or serving an extension project.
///
/// Every variant is a fail-fast abort surfaced at the CLI boundary. The
/// user-facing ones render as an `✗`-marked abort line.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// No environment record exists where one was required.
    #[error("✗ {}", messages::MISSING_PROJECT_CONTEXT)]
    MissingProjectContext,

    /// Credentials were requested but the project has no `.env` file.
    #[error("✗ {}", messages::MISSING_ENV_FILE)]
    MissingEnvFile,

    /// An ensure step (dev store or env) refused to continue.
    #[error("✗ {message}")]
    Precondition { message: String },

    /// The JavaScript toolchain exited unsuccessfully.
    #[error("✗ {}", messages::SERVE_FAILURE)]
    LaunchFailure,

    #[error("No extension project found above '{}'", .0.display())]
    ProjectNotFound(PathBuf),

    #[error("Unknown package manager: {0}")]
    UnknownPackageManager(String),

    #[error("IO operation '{operation}' failed on path '{path}': {source}")]
    IoOperation {
        operation: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid env file at '{path}': {source}")]
    InvalidEnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error("Invalid project file at '{path}': {source}")]
    InvalidProjectFile {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ProjectError>;

impl ProjectError {
    pub fn precondition(message: impl Into<String>) -> Self {
        ProjectError::Precondition {
            message: message.into(),
        }
    }

    pub(crate) fn io(operation: &str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProjectError::IoOperation {
            operation: operation.to_string(),
            path: path.into(),
            source,
        }
    }

    /// Whether this error is an abort meant to be shown to the user verbatim.
    pub fn is_user_abort(&self) -> bool {
        matches!(
            self,
            ProjectError::MissingProjectContext
                | ProjectError::MissingEnvFile
                | ProjectError::Precondition { .. }
                | ProjectError::LaunchFailure
        )
    }
}
