// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried per artifact in generation reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid entity name '{name}': {reason}")]
    InvalidEntityName { name: String, reason: String },

    #[error("Column '{column}' is declared more than once on {entity}")]
    DuplicateColumn { entity: String, column: String },

    #[error("Invalid schema declaration for {entity}: {reason}")]
    InvalidDeclaration { entity: String, reason: String },

    #[error("Illegal artifact transition from {from} to {to}")]
    IllegalTransition { from: String, to: String },

    #[error("Artifact '{kind}' requires an entity name")]
    EntityRequired { kind: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidEntityName { name, .. } => vec![
                format!("'{name}' cannot be used as a class name"),
                "Use a PascalCase model name such as Author or BlogPost".into(),
            ],
            Self::DuplicateColumn { column, .. } => vec![
                format!("Remove the duplicate [[columns]] entry for '{column}'"),
            ],
            Self::InvalidDeclaration { entity, .. } => vec![
                format!("Check the schema manifest that declares {entity}"),
                "Try: stencil schema:show <Model> to inspect what was loaded".into(),
            ],
            Self::EntityRequired { .. } => vec!["Pass the model name as the first argument".into()],
            Self::IllegalTransition { .. } => vec!["This is a bug, please report it".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidEntityName { .. } | Self::EntityRequired { .. } => {
                ErrorCategory::Validation
            }
            Self::DuplicateColumn { .. } | Self::InvalidDeclaration { .. } => {
                ErrorCategory::Schema
            }
            Self::IllegalTransition { .. } => ErrorCategory::Internal,
        }
    }
}
