//! Domain layer: pure schema, typing and naming logic.
//!
//! Nothing in here performs I/O. Declarations come in, descriptors and
//! rules come out.

pub(crate) mod artifact;
pub(crate) mod error;
pub(crate) mod naming;
pub(crate) mod rules;
pub(crate) mod schema;
pub(crate) mod type_map;
pub(crate) mod value_objects;

pub use artifact::{
    ArtifactKind, ArtifactOutcome, ArtifactState, Dependency, DependencyPolicy, EmitOptions,
    GeneratedArtifactSpec, PathLayout,
};
pub use error::DomainError;
pub use naming::{EntityName, EntityNames, namespace_for, pluralize, slugify};
pub use rules::{DATE_TIME_FORMAT, FieldRules, RuleToken, ValidationRuleSet, rules_for};
pub use schema::{
    ColumnDefinition, ColumnDescriptor, EntityDefinition, EntitySchema, RelationDefinition,
    RelationDescriptor, TECHNICAL_COLUMNS, introspect, is_technical,
};
pub use type_map::{NativeType, example_value, map_type};
pub use value_objects::{
    FormatHint, HttpStatus, OverwritePolicy, RelationKind, SemanticType, WebRenderStyle,
};

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Declaration → descriptors → rules
    // ========================================================================

    #[test]
    fn soft_deleting_entity_end_to_end() {
        let def = EntityDefinition::new(EntityName::parse("post").unwrap())
            .soft_deletes()
            .column(ColumnDefinition::new("title", "varchar(120)"))
            .column(ColumnDefinition::new("author_email", "varchar(255)").nullable())
            .column(ColumnDefinition::new("published_at", "timestamp").nullable())
            .relation(RelationDefinition::new("comments", "hasMany", "Comment"));

        let schema = introspect(&def).unwrap();
        assert_eq!(schema.entity.as_str(), "Post");
        assert_eq!(schema.table, "posts");
        assert_eq!(schema.columns.last().map(|c| c.name.as_str()), Some("deleted_at"));

        let rules = ValidationRuleSet::for_schema(&schema);
        assert_eq!(rules.len(), 3);
        let published: Vec<String> = rules
            .get("published_at")
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(published, ["nullable", "string", "date_format:Y-m-d\\TH:i:sP"]);
    }

    // ========================================================================
    // Idempotence
    // ========================================================================

    #[test]
    fn introspection_is_deterministic() {
        let def = EntityDefinition::new(EntityName::parse("Tag").unwrap())
            .column(ColumnDefinition::new("label", "varchar(32)"));
        assert_eq!(introspect(&def).unwrap(), introspect(&def).unwrap());
    }
}
