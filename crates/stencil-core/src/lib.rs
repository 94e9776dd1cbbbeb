//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stencil
//! artifact generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stencil-cli (CLI)             │
//! │   make:dto, make:api-controller, ...    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GeneratorService, SchemaService,      │
//! │   ArtifactPlanner, emitters)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (SchemaSource, ArtifactRenderer,        │
//! │  Filesystem, Confirmer)                 │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stencil-adapters (Infrastructure)    │
//! │ (ManifestSchemaSource, MiniJinjaRenderer│
//! │  LocalFilesystem, FixedConfirmer)       │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (descriptors, type map, rules, naming) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stencil_core::prelude::*;
//!
//! # fn run(
//! #     schema: Box<dyn SchemaSource>,
//! #     renderer: Box<dyn ArtifactRenderer>,
//! #     filesystem: Box<dyn Filesystem>,
//! #     confirmer: Box<dyn Confirmer>,
//! # ) -> StencilResult<()> {
//! let service = GeneratorService::new(schema, renderer, filesystem, confirmer);
//! let request = GenerationRequest::for_entity("Author", [ArtifactKind::Dto, ArtifactKind::RequestDto]);
//! let report = service.generate(&request)?;
//! assert!(!report.has_failures());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationReport, GenerationRequest, GeneratorService, SchemaService,
        ports::{ArtifactRenderer, Confirmer, Filesystem, SchemaSource},
    };
    pub use crate::domain::{
        ArtifactKind, ArtifactOutcome, ArtifactState, ColumnDefinition, ColumnDescriptor,
        EmitOptions, EntityDefinition, EntityName, EntityNames, EntitySchema, FormatHint,
        GeneratedArtifactSpec, OverwritePolicy, PathLayout, RelationDefinition,
        RelationDescriptor, RelationKind, SemanticType, ValidationRuleSet, WebRenderStyle,
    };
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
