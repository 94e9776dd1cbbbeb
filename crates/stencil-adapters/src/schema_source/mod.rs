//! Schema source adapters.
//!
//! Entities are declared explicitly; nothing here reflects on a live
//! application or database.

mod manifest;
mod memory;

pub use manifest::{
    ColumnEntry, EntityManifest, EntitySection, ManifestSchemaSource, RelationEntry,
};
pub use memory::InMemorySchemaSource;
