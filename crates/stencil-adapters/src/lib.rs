//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod prompt;
pub mod renderer;
pub mod schema_source;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use prompt::{FixedConfirmer, ScriptedConfirmer};
pub use renderer::MiniJinjaRenderer;
pub use schema_source::{InMemorySchemaSource, ManifestSchemaSource};
