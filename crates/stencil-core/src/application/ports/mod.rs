//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stencil-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `SchemaSource`: Entity declarations
//!   - `ArtifactRenderer`: Template rendering
//!   - `Filesystem`: File operations
//!   - `Confirmer`: Yes/no decisions (terminal, scripted, fixed)

pub mod output;

pub use output::{ArtifactRenderer, Confirmer, Filesystem, SchemaSource};

#[cfg(test)]
pub use output::{MockArtifactRenderer, MockConfirmer, MockFilesystem, MockSchemaSource};
