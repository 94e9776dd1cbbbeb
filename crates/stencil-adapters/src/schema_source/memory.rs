//! In-memory schema source for testing and embedding.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use stencil_core::{
    application::{ApplicationError, ports::SchemaSource},
    domain::{EntityDefinition, EntityName},
    error::StencilResult,
};

/// Schema source backed by a map of declarations.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchemaSource {
    entities: Arc<RwLock<BTreeMap<String, EntityDefinition>>>,
}

impl InMemorySchemaSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration.
    pub fn with(self, definition: EntityDefinition) -> Self {
        // A poisoned lock only loses this registration; lookups report it.
        if let Ok(mut entities) = self.entities.write() {
            entities.insert(definition.name.to_string(), definition);
        }
        self
    }

    pub fn insert(&self, definition: EntityDefinition) -> StencilResult<()> {
        let mut entities = self
            .entities
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        entities.insert(definition.name.to_string(), definition);
        Ok(())
    }
}

impl SchemaSource for InMemorySchemaSource {
    fn definition(&self, entity: &EntityName) -> StencilResult<EntityDefinition> {
        let entities = self
            .entities
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        entities.get(entity.as_str()).cloned().ok_or_else(|| {
            ApplicationError::EntityNotFound {
                entity: entity.to_string(),
            }
            .into()
        })
    }

    fn entities(&self) -> StencilResult<Vec<EntityName>> {
        let entities = self
            .entities
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(entities.values().map(|def| def.name.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::domain::ColumnDefinition;

    fn name(raw: &str) -> EntityName {
        EntityName::parse(raw).unwrap()
    }

    #[test]
    fn lookup_and_listing() {
        let source = InMemorySchemaSource::new()
            .with(EntityDefinition::new(name("Book")))
            .with(
                EntityDefinition::new(name("Author"))
                    .column(ColumnDefinition::new("name", "varchar(255)")),
            );

        assert_eq!(source.definition(&name("Author")).unwrap().columns.len(), 1);
        let listed: Vec<String> = source
            .entities()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(listed, ["Author", "Book"]);
    }

    #[test]
    fn unknown_entity_is_not_found() {
        let source = InMemorySchemaSource::new();
        let err = source.definition(&name("Ghost")).unwrap_err();
        assert!(err.is_entity_not_found());
    }
}
