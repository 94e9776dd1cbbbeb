//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GeneratorService, SchemaService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer. Typing, naming and
//! rule synthesis live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ArtifactPlanner, EntityOverview, GenerationReport, GenerationRequest, GeneratorService, Plan,
    PlannedArtifact, SchemaService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{ArtifactRenderer, Confirmer, Filesystem, SchemaSource};

pub use error::ApplicationError;
