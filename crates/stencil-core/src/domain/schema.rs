//! Entity declarations and their introspected descriptors.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::error::DomainError;
use super::naming::{EntityName, EntityNames};
use super::type_map::{NativeType, map_type};
use super::value_objects::{FormatHint, RelationKind, SemanticType};

/// Framework-managed columns; never part of request payloads.
pub const TECHNICAL_COLUMNS: &[&str] = &["id", "created_at", "updated_at", "deleted_at"];

pub fn is_technical(column: &str) -> bool {
    TECHNICAL_COLUMNS.contains(&column)
}

// ============================================================================
// Declarations (input)
// ============================================================================

/// One declared physical column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub native_type: String,
    pub nullable: bool,
    pub default: Option<Value>,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, native_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            native_type: native_type.into(),
            nullable: false,
            default: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// One declared relation accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDefinition {
    pub accessor: String,
    pub kind: String,
    pub related: String,
}

impl RelationDefinition {
    pub fn new(
        accessor: impl Into<String>,
        kind: impl Into<String>,
        related: impl Into<String>,
    ) -> Self {
        Self {
            accessor: accessor.into(),
            kind: kind.into(),
            related: related.into(),
        }
    }
}

/// Explicit declaration of a persisted entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDefinition {
    pub name: EntityName,
    pub table: Option<String>,
    pub soft_deletes: bool,
    pub columns: Vec<ColumnDefinition>,
    pub relations: Vec<RelationDefinition>,
}

impl EntityDefinition {
    pub fn new(name: EntityName) -> Self {
        Self {
            name,
            table: None,
            soft_deletes: false,
            columns: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn soft_deletes(mut self) -> Self {
        self.soft_deletes = true;
        self
    }

    pub fn column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    pub fn relation(mut self, relation: RelationDefinition) -> Self {
        self.relations.push(relation);
        self
    }
}

// ============================================================================
// Descriptors (output)
// ============================================================================

/// One persisted column as seen by the emitters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub semantic_type: SemanticType,
    pub native_type: String,
    pub max_length: Option<u32>,
    pub nullable: bool,
    pub default_value: Option<Value>,
    pub format_hint: Option<FormatHint>,
}

impl ColumnDescriptor {
    fn from_definition(def: &ColumnDefinition) -> Self {
        let (semantic_type, format_hint) = map_type(&def.native_type, &def.name);
        let max_length = match semantic_type {
            SemanticType::String => NativeType::parse(&def.native_type).length,
            _ => None,
        };

        Self {
            name: def.name.clone(),
            semantic_type,
            native_type: def.native_type.clone(),
            max_length,
            nullable: def.nullable,
            default_value: def.default.clone(),
            format_hint,
        }
    }

    fn technical(name: &str, declared: Option<&ColumnDefinition>) -> Self {
        let (semantic_type, format_hint, nullable, fallback_native) = match name {
            "id" => (SemanticType::Int, None, true, "bigint unsigned"),
            "deleted_at" => (SemanticType::String, Some(FormatHint::DateTime), true, "timestamp"),
            _ => (SemanticType::String, Some(FormatHint::DateTime), false, "timestamp"),
        };

        Self {
            name: name.to_string(),
            semantic_type,
            native_type: declared
                .map(|def| def.native_type.clone())
                .unwrap_or_else(|| fallback_native.to_string()),
            max_length: None,
            nullable,
            default_value: None,
            format_hint,
        }
    }

    pub fn is_technical(&self) -> bool {
        is_technical(&self.name)
    }
}

/// One relation accessor as seen by the emitters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationDescriptor {
    pub accessor: String,
    pub kind: RelationKind,
    pub related: EntityName,
}

/// Introspected entity: physical columns first, then technical columns in
/// the fixed order `id`, `created_at`, `updated_at`, `deleted_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySchema {
    pub entity: EntityName,
    pub table: String,
    pub columns: Vec<ColumnDescriptor>,
    pub relations: Vec<RelationDescriptor>,
}

impl EntitySchema {
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Columns accepted in create/update payloads.
    pub fn request_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|column| !column.is_technical())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}

/// Build the [`EntitySchema`] for a declaration.
///
/// Technical columns appear exactly once, whether declared or not.
/// `deleted_at` is only included for soft-deleting entities or when declared.
/// Unrecognized relation kinds and relations shadowing a column are dropped.
/// Column names and relation accessors must be PHP identifiers.
pub fn introspect(def: &EntityDefinition) -> Result<EntitySchema, DomainError> {
    let mut seen = HashSet::new();
    for column in &def.columns {
        if column.name.trim().is_empty() {
            return Err(DomainError::InvalidDeclaration {
                entity: def.name.to_string(),
                reason: "a column has an empty name".into(),
            });
        }
        if !is_identifier(&column.name) {
            return Err(DomainError::InvalidDeclaration {
                entity: def.name.to_string(),
                reason: format!("column '{}' is not a valid identifier", column.name),
            });
        }
        if !seen.insert(column.name.as_str()) {
            return Err(DomainError::DuplicateColumn {
                entity: def.name.to_string(),
                column: column.name.clone(),
            });
        }
    }

    let declared = |name: &str| def.columns.iter().find(|column| column.name == name);

    let mut columns: Vec<ColumnDescriptor> = def
        .columns
        .iter()
        .filter(|column| !is_technical(&column.name))
        .map(ColumnDescriptor::from_definition)
        .collect();

    for name in ["id", "created_at", "updated_at"] {
        columns.push(ColumnDescriptor::technical(name, declared(name)));
    }
    if def.soft_deletes || declared("deleted_at").is_some() {
        columns.push(ColumnDescriptor::technical("deleted_at", declared("deleted_at")));
    }

    let mut relations: Vec<RelationDescriptor> = Vec::new();
    for relation in &def.relations {
        if !is_identifier(&relation.accessor) {
            return Err(DomainError::InvalidDeclaration {
                entity: def.name.to_string(),
                reason: format!("relation '{}' is not a valid identifier", relation.accessor),
            });
        }
        let Some(kind) = RelationKind::recognize(&relation.kind) else {
            debug!(
                entity = %def.name,
                accessor = %relation.accessor,
                kind = %relation.kind,
                "Skipping unrecognized relation kind"
            );
            continue;
        };

        if columns.iter().any(|column| column.name == relation.accessor) {
            debug!(entity = %def.name, accessor = %relation.accessor, "Relation shadows a column");
            continue;
        }

        if relations.iter().any(|existing| existing.accessor == relation.accessor) {
            continue;
        }

        let related = EntityName::parse(&relation.related).map_err(|_| {
            DomainError::InvalidDeclaration {
                entity: def.name.to_string(),
                reason: format!(
                    "relation '{}' points at invalid model '{}'",
                    relation.accessor, relation.related
                ),
            }
        })?;

        relations.push(RelationDescriptor {
            accessor: relation.accessor.clone(),
            kind,
            related,
        });
    }

    let table = def
        .table
        .clone()
        .unwrap_or_else(|| EntityNames::new(&def.name).snake_plural);

    Ok(EntitySchema {
        entity: def.name.clone(),
        table,
        columns,
        relations,
    })
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
