//! Project-wide artifacts: the abstract DTO base and the generator config.

use std::path::Path;

use serde::Serialize;

use super::EmitContext;
use crate::domain::ArtifactKind;

#[derive(Debug, Serialize)]
pub(super) struct BaseDtoModel {
    pub namespace: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ConfigPaths {
    pub models: String,
    pub dto: String,
    pub http: String,
    pub api_controllers: String,
    pub web_controllers: String,
    pub services: String,
    pub repositories: String,
}

/// Values are pre-quoted TOML strings.
#[derive(Debug, Serialize)]
pub(super) struct GeneratorConfigModel {
    pub version: &'static str,
    pub paths: ConfigPaths,
    pub schema_dir: String,
    pub cache_ttl: u32,
    pub per_page: u32,
}

pub(super) fn base_dto(ctx: &EmitContext<'_>) -> BaseDtoModel {
    BaseDtoModel {
        namespace: ctx.class_ref(ArtifactKind::BaseDto).namespace,
    }
}

pub(super) fn generator_config(ctx: &EmitContext<'_>) -> GeneratorConfigModel {
    let layout = ctx.layout;
    GeneratorConfigModel {
        version: crate::VERSION,
        paths: ConfigPaths {
            models: toml_path(&layout.models),
            dto: toml_path(&layout.dto),
            http: toml_path(&layout.http),
            api_controllers: toml_path(&layout.api_controllers),
            web_controllers: toml_path(&layout.web_controllers),
            services: toml_path(&layout.services),
            repositories: toml_path(&layout.repositories),
        },
        schema_dir: toml_path(&layout.schema_dir),
        cache_ttl: ctx.options.cache_ttl_seconds,
        per_page: ctx.options.per_page,
    }
}

fn toml_path(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    serde_json::Value::String(normalized).to_string()
}
