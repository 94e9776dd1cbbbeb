//! Filesystem-based entity declarations.
//!
//! Each entity is declared in its own TOML manifest under the schema
//! directory (`stencil/schema` by default).
//!
//! # Directory layout expected
//!
//! ```text
//! stencil/schema/
//! ├── Author.toml
//! ├── Book.toml
//! └── blog/
//!     └── Post.toml      ← nested files are found by scanning
//! ```
//!
//! # Manifest format
//!
//! ```toml
//! [entity]
//! name         = "Post"
//! table        = "posts"        # optional, defaults to the snake plural
//! soft_deletes = true           # optional
//!
//! [[columns]]
//! name     = "title"
//! type     = "varchar(255)"     # native column type
//! nullable = false              # optional
//! default  = "Untitled"         # optional, any TOML scalar or array
//!
//! [[relations]]
//! name    = "comments"
//! kind    = "hasMany"           # hasOne | belongsTo | hasMany | belongsToMany | ...
//! related = "Comment"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use stencil_core::{
    application::{ApplicationError, ports::SchemaSource},
    domain::{
        ColumnDefinition, DomainError, EntityDefinition, EntityName, EntityNames,
        RelationDefinition,
    },
    error::StencilResult,
};

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of one entity manifest.
#[derive(Debug, Deserialize, Clone)]
pub struct EntityManifest {
    pub entity: EntitySection,
    #[serde(default)]
    pub columns: Vec<ColumnEntry>,
    #[serde(default)]
    pub relations: Vec<RelationEntry>,
}

/// `[entity]` section.
#[derive(Debug, Deserialize, Clone)]
pub struct EntitySection {
    pub name: String,
    pub table: Option<String>,
    #[serde(default)]
    pub soft_deletes: bool,
}

/// One entry under `[[columns]]`.
#[derive(Debug, Deserialize, Clone)]
pub struct ColumnEntry {
    pub name: String,
    /// Native type as written in a migration (e.g. `"varchar(255)"`).
    #[serde(rename = "type")]
    pub native_type: String,
    #[serde(default)]
    pub nullable: bool,
    pub default: Option<serde_json::Value>,
}

/// One entry under `[[relations]]`.
#[derive(Debug, Deserialize, Clone)]
pub struct RelationEntry {
    /// Accessor name on the model.
    pub name: String,
    pub kind: String,
    pub related: String,
}

impl EntityManifest {
    /// Convert into a domain declaration.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidEntityName`] when `[entity] name` is not
    /// a valid class name.
    pub fn into_definition(self) -> Result<EntityDefinition, DomainError> {
        let mut def = EntityDefinition::new(EntityName::parse(&self.entity.name)?);
        def.table = self.entity.table;
        def.soft_deletes = self.entity.soft_deletes;

        for column in self.columns {
            let mut declared = ColumnDefinition::new(column.name, column.native_type);
            declared.nullable = column.nullable;
            declared.default = column.default;
            def = def.column(declared);
        }
        for relation in self.relations {
            def = def.relation(RelationDefinition::new(
                relation.name,
                relation.kind,
                relation.related,
            ));
        }
        Ok(def)
    }
}

// ── Source ────────────────────────────────────────────────────────────────────

/// Reads entity declarations from a directory of TOML manifests.
///
/// Lookup tries `<dir>/<Entity>.toml` and `<dir>/<snake>.toml` first, then
/// scans the whole tree. Manifests that fail to parse during a scan emit a
/// `WARN` log and are skipped; they do not hide other entities.
///
/// # Example
///
/// ```no_run
/// use stencil_adapters::ManifestSchemaSource;
/// use stencil_core::prelude::*;
///
/// let source = ManifestSchemaSource::new("stencil/schema");
/// for entity in source.entities()? {
///     println!("{entity}");
/// }
/// # Ok::<(), StencilError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ManifestSchemaSource {
    schema_dir: PathBuf,
}

impl ManifestSchemaSource {
    /// Create a source pointed at `schema_dir`.
    ///
    /// The directory does not need to exist; a missing directory declares
    /// no entities.
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
        }
    }

    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Candidate manifest paths for an entity, in lookup order.
    fn conventional_paths(&self, entity: &EntityName) -> [PathBuf; 2] {
        let names = EntityNames::new(entity);
        [
            self.schema_dir.join(format!("{}.toml", names.class)),
            self.schema_dir.join(format!("{}.toml", names.snake)),
        ]
    }

    /// Every `.toml` file under the schema directory, sorted.
    fn manifest_files(&self) -> Vec<PathBuf> {
        if !self.schema_dir.is_dir() {
            debug!(dir = %self.schema_dir.display(), "schema directory does not exist");
            return Vec::new();
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.schema_dir)
            .min_depth(1)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable schema entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        files.sort();
        files
    }

    /// Scan every manifest, skipping the ones that do not load.
    fn scan(&self) -> Vec<(PathBuf, EntityDefinition)> {
        self.manifest_files()
            .into_iter()
            .filter_map(|path| match load_manifest(&path) {
                Ok(def) => Some((path, def)),
                Err(e) => {
                    warn!(
                        file  = %path.display(),
                        error = %e,
                        "skipping schema manifest due to load error"
                    );
                    None
                }
            })
            .collect()
    }
}

impl SchemaSource for ManifestSchemaSource {
    #[instrument(skip(self), fields(dir = %self.schema_dir.display()))]
    fn definition(&self, entity: &EntityName) -> StencilResult<EntityDefinition> {
        for path in self.conventional_paths(entity) {
            if !path.is_file() {
                continue;
            }
            debug!(file = %path.display(), "reading conventional manifest");

            // A broken manifest at the conventional location is reported,
            // not skipped: it is the declaration the user meant.
            let def = load_manifest(&path).map_err(|e| DomainError::InvalidDeclaration {
                entity: entity.to_string(),
                reason: e.to_string(),
            })?;
            if def.name == *entity {
                return Ok(def);
            }
            warn!(
                file     = %path.display(),
                declared = %def.name,
                "manifest declares a different entity"
            );
        }

        self.scan()
            .into_iter()
            .find(|(_, def)| def.name == *entity)
            .map(|(path, def)| {
                debug!(file = %path.display(), "found manifest by scanning");
                def
            })
            .ok_or_else(|| {
                ApplicationError::EntityNotFound {
                    entity: entity.to_string(),
                }
                .into()
            })
    }

    #[instrument(skip(self), fields(dir = %self.schema_dir.display()))]
    fn entities(&self) -> StencilResult<Vec<EntityName>> {
        let mut names: Vec<EntityName> = self.scan().into_iter().map(|(_, def)| def.name).collect();
        names.sort();
        names.dedup();
        debug!(count = names.len(), "listed declared entities");
        Ok(names)
    }
}

// ── Parsing helpers ───────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
enum ManifestError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{0}")]
    Domain(#[from] DomainError),
}

fn load_manifest(path: &Path) -> Result<EntityDefinition, ManifestError> {
    let raw = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: EntityManifest = toml::from_str(&raw).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(manifest.into_definition()?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const POST: &str = r#"
[entity]
name = "Post"
soft_deletes = true

[[columns]]
name = "title"
type = "varchar(200)"

[[columns]]
name = "views"
type = "int unsigned"
default = 0

[[relations]]
name = "comments"
kind = "hasMany"
related = "Comment"
"#;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn name(raw: &str) -> EntityName {
        EntityName::parse(raw).unwrap()
    }

    #[test]
    fn reads_conventional_manifest() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "Post.toml", POST);

        let def = ManifestSchemaSource::new(tmp.path())
            .definition(&name("Post"))
            .unwrap();

        assert!(def.soft_deletes);
        assert_eq!(def.columns.len(), 2);
        assert_eq!(def.columns[1].default, Some(serde_json::json!(0)));
        assert_eq!(def.relations[0].kind, "hasMany");
    }

    #[test]
    fn finds_nested_manifest_by_scanning() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "blog/post-entity.toml", POST);

        let def = ManifestSchemaSource::new(tmp.path())
            .definition(&name("post"))
            .unwrap();
        assert_eq!(def.name.as_str(), "Post");
    }

    #[test]
    fn missing_entity_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = ManifestSchemaSource::new(tmp.path())
            .definition(&name("Ghost"))
            .unwrap_err();
        assert!(err.is_entity_not_found());
    }

    #[test]
    fn broken_conventional_manifest_is_a_declaration_error() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "Post.toml", "[entity\nname = ");

        let err = ManifestSchemaSource::new(tmp.path())
            .definition(&name("Post"))
            .unwrap_err();
        assert!(!err.is_entity_not_found());
        assert!(err.to_string().contains("Post"));
    }

    #[test]
    fn listing_skips_bad_manifests_and_sorts() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "Post.toml", POST);
        write(tmp.path(), "Author.toml", "[entity]\nname = \"Author\"\n");
        write(tmp.path(), "broken.toml", "not toml at all [");
        write(tmp.path(), "README.md", "# ignored");

        let listed: Vec<String> = ManifestSchemaSource::new(tmp.path())
            .entities()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(listed, ["Author", "Post"]);
    }

    #[test]
    fn missing_directory_declares_nothing() {
        let source = ManifestSchemaSource::new("/definitely/not/here");
        assert!(source.entities().unwrap().is_empty());
    }
}
