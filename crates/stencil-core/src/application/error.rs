//! Application layer errors.
//!
//! These errors represent failures in orchestration: resolving entities,
//! planning prerequisites, rendering and writing. Declaration errors are
//! `DomainError` from `crate::domain`.

use std::path::PathBuf;

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// No schema declaration exists for the named entity.
    #[error("No schema declaration found for entity '{entity}'")]
    EntityNotFound { entity: String },

    /// A declaration exists but could not be turned into descriptors.
    #[error("Schema introspection failed for '{entity}': {reason}")]
    SchemaIntrospection { entity: String, reason: String },

    /// A required artifact does not exist and cannot be chained.
    #[error("{artifact} not found at {path}")]
    PrerequisiteMissing {
        artifact: String,
        path: PathBuf,
        remediation: String,
    },

    /// The user declined to generate a chained prerequisite.
    #[error("{artifact} is required and was not generated")]
    PrerequisiteDeclined {
        artifact: String,
        remediation: String,
    },

    /// Template rendering failed.
    #[error("Rendering {template} failed: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Confirmation could not be obtained (closed input, terminal error).
    #[error("Could not read confirmation: {reason}")]
    PromptFailed { reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Schema store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EntityNotFound { entity } => vec![
                format!("Declare {entity} in a schema manifest (for example stencil/schema/{entity}.toml)"),
                "Try: stencil schema:list to see declared entities".into(),
            ],
            Self::SchemaIntrospection { entity, .. } => vec![
                format!("Fix the declaration for {entity}"),
                format!("Try: stencil schema:show {entity}"),
            ],
            Self::PrerequisiteMissing { remediation, .. } => {
                vec![format!("Run: stencil {remediation}")]
            }
            Self::PrerequisiteDeclined { remediation, .. } => vec![
                format!("Run: stencil {remediation}"),
                "Or re-run with --force to generate it without asking".into(),
            ],
            Self::RenderingFailed { template, .. } => vec![
                format!("Check the template '{template}'"),
                "Remove local template overrides to fall back to the built-in ones".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::PromptFailed { .. } => vec![
                "Run with --no-interaction to answer every prompt with no".into(),
                "Or pass --force to overwrite without asking".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EntityNotFound { .. } => ErrorCategory::NotFound,
            Self::SchemaIntrospection { .. } => ErrorCategory::Schema,
            Self::PrerequisiteMissing { .. } | Self::PrerequisiteDeclined { .. } => {
                ErrorCategory::Prerequisite
            }
            Self::PromptFailed { .. } => ErrorCategory::Validation,
            Self::RenderingFailed { .. }
            | Self::FilesystemError { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
