//! Schema inspection use cases (`schema:list`, `schema:show`).

use serde::Serialize;
use tracing::instrument;

use crate::{
    application::ports::SchemaSource,
    domain::{EntityName, EntitySchema, ValidationRuleSet, introspect},
    error::StencilResult,
};

/// Introspected entity together with the rules its requests would carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityOverview {
    pub schema: EntitySchema,
    pub rules: ValidationRuleSet,
}

pub struct SchemaService {
    source: Box<dyn SchemaSource>,
}

impl SchemaService {
    pub fn new(source: Box<dyn SchemaSource>) -> Self {
        Self { source }
    }

    /// All declared entities.
    pub fn list(&self) -> StencilResult<Vec<EntityName>> {
        self.source.entities()
    }

    /// Introspect one entity.
    #[instrument(skip(self))]
    pub fn describe(&self, entity: &str) -> StencilResult<EntityOverview> {
        let entity = EntityName::parse(entity)?;
        let definition = self.source.definition(&entity)?;
        let schema = introspect(&definition)?;
        let rules = ValidationRuleSet::for_schema(&schema);
        Ok(EntityOverview { schema, rules })
    }
}
