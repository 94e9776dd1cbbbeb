//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate provides implementations.

use std::path::Path;

use serde_json::Value;

use crate::domain::{EntityDefinition, EntityName};
use crate::error::StencilResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing)
///
/// `write_file` replaces the whole file at once; readers never observe a
/// partially written artifact.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// Atomically write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for entity declarations.
///
/// Implemented by:
/// - `stencil_adapters::schema_source::ManifestSchemaSource` (TOML manifests)
/// - `stencil_adapters::schema_source::InMemorySchemaSource` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait SchemaSource: Send + Sync {
    /// Look up the declaration for an entity.
    ///
    /// Returns `ApplicationError::EntityNotFound` when nothing declares it.
    fn definition(&self, entity: &EntityName) -> StencilResult<EntityDefinition>;

    /// All declared entities, sorted by name.
    fn entities(&self) -> StencilResult<Vec<EntityName>>;
}

/// Port for rendering a named template against a structured model.
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactRenderer: Send + Sync {
    fn render(&self, template: &str, model: &Value) -> StencilResult<String>;
}

/// Port for yes/no decisions during generation.
///
/// Implemented by:
/// - `stencil_adapters::prompt::FixedConfirmer` (`--no-interaction`, CI)
/// - `stencil_adapters::prompt::ScriptedConfirmer` (tests)
/// - `TerminalConfirmer` in the CLI
#[cfg_attr(test, mockall::automock)]
pub trait Confirmer: Send + Sync {
    fn confirm(&self, question: &str, default: bool) -> StencilResult<bool>;
}
