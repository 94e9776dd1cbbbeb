//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference. The
//! CLI layer owns config; the core crate only sees the [`PathLayout`] and
//! [`EmitOptions`] derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `STENCIL_PATHS__DTO=src/Dto`, `STENCIL_CACHE__TTL_SECONDS=60`
//! 3. The file passed with `--config`
//! 4. `.stencil.toml` in the working directory (written by `make:generator-init`)
//! 5. The user-wide file under the platform config directory
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use stencil_core::domain::{EmitOptions, PathLayout};

use crate::error::CliResult;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "STENCIL";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output directories of generated artifacts.
    pub paths: PathsConfig,
    pub schema: SchemaConfig,
    pub cache: CacheConfig,
    pub pagination: PaginationConfig,
    /// Template overrides.
    pub templates: TemplateConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub models: PathBuf,
    pub dto: PathBuf,
    pub http: PathBuf,
    pub api_controllers: PathBuf,
    pub web_controllers: PathBuf,
    pub services: PathBuf,
    pub repositories: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        let layout = PathLayout::default();
        Self {
            models: layout.models,
            dto: layout.dto,
            http: layout.http,
            api_controllers: layout.api_controllers,
            web_controllers: layout.web_controllers,
            services: layout.services,
            repositories: layout.repositories,
        }
    }
}

/// Where entity manifests live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub dir: PathBuf,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            dir: PathLayout::default().schema_dir,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL of repository read caches.
    pub ttl_seconds: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: EmitOptions::default().cache_ttl_seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub per_page: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            per_page: EmitOptions::default().per_page,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory whose `*.j2` files shadow the built-in templates.
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration for the current working directory.
    ///
    /// `explicit` is the path the user passed via `--config`; it must exist.
    pub fn load(explicit: Option<&PathBuf>) -> CliResult<Self> {
        Self::load_from(
            Path::new("."),
            Self::global_config_path().as_deref(),
            explicit.map(PathBuf::as_path),
        )
    }

    /// Layer every source on top of the built-in defaults.
    pub fn load_from(
        project_dir: &Path,
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> CliResult<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(global) = global {
            builder = builder.add_source(File::from(global).format(FileFormat::Toml).required(false));
        }

        let project = Self::project_config_path(project_dir);
        builder = builder.add_source(File::from(project).format(FileFormat::Toml).required(false));

        if let Some(explicit) = explicit {
            debug!(path = %explicit.display(), "Using explicit config file");
            builder = builder.add_source(File::from(explicit).format(FileFormat::Toml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// `.stencil.toml` inside `project_dir`.
    pub fn project_config_path(project_dir: &Path) -> PathBuf {
        project_dir.join(PathLayout::default().config_file)
    }

    /// User-wide configuration file, if the platform has a config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "stencil", "stencil")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Directory layout handed to the generator.
    pub fn layout(&self) -> PathLayout {
        PathLayout {
            models: self.paths.models.clone(),
            dto: self.paths.dto.clone(),
            http: self.paths.http.clone(),
            api_controllers: self.paths.api_controllers.clone(),
            web_controllers: self.paths.web_controllers.clone(),
            services: self.paths.services.clone(),
            repositories: self.paths.repositories.clone(),
            schema_dir: self.schema.dir.clone(),
            ..PathLayout::default()
        }
    }

    /// Emit options with config-driven cache and pagination values.
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            cache_ttl_seconds: self.cache.ttl_seconds,
            per_page: self.pagination.per_page,
            ..EmitOptions::default()
        }
    }

    /// Look up a dotted key such as `paths.dto`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let tree = serde_json::to_value(self).ok()?;
        let pointer = format!("/{}", key.replace('.', "/"));
        tree.pointer(&pointer).cloned()
    }
}
