//! Repository and service models.

use serde::Serialize;

use super::{ClassRef, EmitContext};
use crate::domain::{ArtifactKind, EntityNames};

#[derive(Debug, Serialize)]
pub(super) struct RepositoryModel {
    pub namespace: String,
    pub class: String,
    pub model: ClassRef,
    pub cache_prefix: String,
    pub cache_ttl: u32,
    pub per_page: u32,
    pub title_plural: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ServiceModel {
    pub namespace: String,
    pub class: String,
    pub repository: ClassRef,
    pub model: ClassRef,
    pub title: String,
    pub per_page: u32,
}

pub(super) fn repository(ctx: &EmitContext<'_>, names: &EntityNames) -> RepositoryModel {
    let class = ctx.class_ref(ArtifactKind::Repository);
    RepositoryModel {
        namespace: class.namespace,
        class: class.class,
        model: ctx.model_ref(names),
        cache_prefix: names.cache_prefix.clone(),
        cache_ttl: ctx.options.cache_ttl_seconds,
        per_page: ctx.options.per_page,
        title_plural: names.title_plural.clone(),
    }
}

pub(super) fn service(ctx: &EmitContext<'_>, names: &EntityNames) -> ServiceModel {
    let class = ctx.class_ref(ArtifactKind::Service);
    ServiceModel {
        namespace: class.namespace,
        class: class.class,
        repository: ctx.class_ref(ArtifactKind::Repository),
        model: ctx.model_ref(names),
        title: names.title.clone(),
        per_page: ctx.options.per_page,
    }
}
