//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate the API classes for a model" or
//! "show what a declaration introspects to".

pub mod emitters;
pub mod generator_service;
pub mod planner;
pub mod schema_service;

pub use generator_service::{GenerationReport, GenerationRequest, GeneratorService};
pub use planner::{ArtifactPlanner, Plan, PlanFlags, PlannedArtifact};
pub use schema_service::{EntityOverview, SchemaService};
