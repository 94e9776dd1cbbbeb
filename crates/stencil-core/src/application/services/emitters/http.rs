//! Form request and API resource models.

use serde::Serialize;

use super::{ClassRef, EmitContext};
use crate::domain::{ArtifactKind, EntityNames};

#[derive(Debug, Serialize)]
pub(super) struct RequestModel {
    pub namespace: String,
    pub class: String,
    pub request_dto: ClassRef,
}

#[derive(Debug, Serialize)]
pub(super) struct ResourceModel {
    pub namespace: String,
    pub class: String,
    pub dto: ClassRef,
    pub model: ClassRef,
}

pub(super) fn request(ctx: &EmitContext<'_>, _names: &EntityNames) -> RequestModel {
    let class = ctx.class_ref(ArtifactKind::Request);
    RequestModel {
        namespace: class.namespace,
        class: class.class,
        request_dto: ctx.class_ref(ArtifactKind::RequestDto),
    }
}

pub(super) fn resource(ctx: &EmitContext<'_>, names: &EntityNames) -> ResourceModel {
    let class = ctx.class_ref(ArtifactKind::Resource);
    ResourceModel {
        namespace: class.namespace,
        class: class.class,
        dto: ctx.class_ref(ArtifactKind::Dto),
        model: ctx.model_ref(names),
    }
}
