//! Artifact emitters.
//!
//! Each emitter turns an [`EmitContext`] into a serializable template model.
//! Models carry every name, type and expression the template needs, so
//! templates only decide layout. Emitting never touches the filesystem.

mod controllers;
mod data;
mod dto;
mod http;
mod init;
mod php;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    application::{ApplicationError, ports::ArtifactRenderer},
    domain::{
        ArtifactKind, DomainError, EmitOptions, EntityNames, EntitySchema,
        GeneratedArtifactSpec, OverwritePolicy, PathLayout, namespace_for,
    },
    error::{StencilError, StencilResult},
};

pub use php::{php_literal, php_string};

/// Everything an emitter may read.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    pub names: Option<&'a EntityNames>,
    pub schema: Option<&'a EntitySchema>,
    pub layout: &'a PathLayout,
    pub options: &'a EmitOptions,
}

impl<'a> EmitContext<'a> {
    fn names(&self, kind: ArtifactKind) -> StencilResult<&'a EntityNames> {
        self.names.ok_or_else(|| {
            DomainError::EntityRequired {
                kind: kind.to_string(),
            }
            .into()
        })
    }

    fn schema(&self, kind: ArtifactKind) -> StencilResult<&'a EntitySchema> {
        self.schema.ok_or_else(|| StencilError::Internal {
            message: format!("{kind} rendered without an entity schema"),
        })
    }

    fn class_ref(&self, kind: ArtifactKind) -> ClassRef {
        ClassRef::new(&self.layout.dir_for(kind), kind.class_name(self.names))
    }

    fn model_ref(&self, names: &EntityNames) -> ClassRef {
        ClassRef::new(&self.layout.models, names.class.clone())
    }
}

/// A PHP class: short name, namespace and fully-qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRef {
    pub namespace: String,
    pub class: String,
    pub fqcn: String,
}

impl ClassRef {
    pub fn new(dir: &Path, class: String) -> Self {
        let namespace = namespace_for(dir);
        let fqcn = if namespace.is_empty() {
            class.clone()
        } else {
            format!("{namespace}\\{class}")
        };
        Self {
            namespace,
            class,
            fqcn,
        }
    }
}

/// Build the template model for one artifact kind.
pub fn build_model(kind: ArtifactKind, ctx: &EmitContext<'_>) -> StencilResult<Value> {
    let model = match kind {
        ArtifactKind::GeneratorConfig => to_value(init::generator_config(ctx))?,
        ArtifactKind::BaseDto => to_value(init::base_dto(ctx))?,
        ArtifactKind::Dto => to_value(dto::primary(ctx, ctx.names(kind)?, ctx.schema(kind)?))?,
        ArtifactKind::RequestDto => {
            to_value(dto::request(ctx, ctx.names(kind)?, ctx.schema(kind)?))?
        }
        ArtifactKind::Request => to_value(http::request(ctx, ctx.names(kind)?))?,
        ArtifactKind::Resource => to_value(http::resource(ctx, ctx.names(kind)?))?,
        ArtifactKind::Repository => to_value(data::repository(ctx, ctx.names(kind)?))?,
        ArtifactKind::Service => to_value(data::service(ctx, ctx.names(kind)?))?,
        ArtifactKind::ApiController => {
            to_value(controllers::api(ctx, ctx.names(kind)?))?
        }
        ArtifactKind::WebController => {
            to_value(controllers::web(ctx, ctx.names(kind)?))?
        }
    };
    Ok(model)
}

/// Render one artifact.
pub fn emit(
    kind: ArtifactKind,
    target_path: PathBuf,
    overwrite_policy: OverwritePolicy,
    ctx: &EmitContext<'_>,
    renderer: &dyn ArtifactRenderer,
) -> StencilResult<GeneratedArtifactSpec> {
    let model = build_model(kind, ctx)?;
    let rendered_content = renderer.render(kind.template(), &model)?;
    debug!(artifact = %kind, bytes = rendered_content.len(), "Artifact rendered");

    Ok(GeneratedArtifactSpec {
        kind,
        target_path,
        overwrite_policy,
        rendered_content,
    })
}

fn to_value(model: impl Serialize) -> StencilResult<Value> {
    serde_json::to_value(model).map_err(|e| {
        ApplicationError::RenderingFailed {
            template: "model".into(),
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockArtifactRenderer;
    use crate::domain::{ColumnDefinition, EntityDefinition, EntityName, introspect};

    fn author() -> (EntityNames, EntitySchema) {
        let entity = EntityName::parse("Author").unwrap();
        let def = EntityDefinition::new(entity.clone())
            .column(ColumnDefinition::new("name", "varchar(255)"))
            .column(ColumnDefinition::new("email", "varchar(255)").nullable());
        (EntityNames::new(&entity), introspect(&def).unwrap())
    }

    #[test]
    fn class_refs_follow_layout() {
        let r = ClassRef::new(Path::new("app/Http/Requests"), "AuthorRequest".into());
        assert_eq!(r.namespace, "App\\Http\\Requests");
        assert_eq!(r.fqcn, "App\\Http\\Requests\\AuthorRequest");
    }

    #[test]
    fn emit_renders_the_kind_template() {
        let (names, schema) = author();
        let layout = PathLayout::default();
        let options = EmitOptions::default();
        let ctx = EmitContext {
            names: Some(&names),
            schema: Some(&schema),
            layout: &layout,
            options: &options,
        };

        let mut renderer = MockArtifactRenderer::new();
        renderer
            .expect_render()
            .withf(|template: &str, model: &Value| {
                template == "request_dto.php.j2" && model["class"] == "AuthorRequestDto"
            })
            .times(1)
            .returning(|_, _| Ok("<?php\n".into()));

        let spec = emit(
            ArtifactKind::RequestDto,
            PathBuf::from("app/DTO/AuthorRequestDto.php"),
            OverwritePolicy::PromptIfExists,
            &ctx,
            &renderer,
        )
        .unwrap();
        assert_eq!(spec.rendered_content, "<?php\n");
    }

    #[test]
    fn entity_artifacts_require_names() {
        let layout = PathLayout::default();
        let options = EmitOptions::default();
        let ctx = EmitContext {
            names: None,
            schema: None,
            layout: &layout,
            options: &options,
        };
        assert!(build_model(ArtifactKind::Repository, &ctx).is_err());
        assert!(build_model(ArtifactKind::BaseDto, &ctx).is_ok());
    }
}
