//! API and web controller models.

use convert_case::{Case, Casing};
use serde::Serialize;

use super::{ClassRef, EmitContext};
use crate::domain::{ArtifactKind, EntityNames, HttpStatus, WebRenderStyle};

#[derive(Debug, Serialize)]
pub(super) struct StatusCodes {
    pub ok: u16,
    pub created: u16,
    pub not_found: u16,
    pub unprocessable: u16,
    pub server_error: u16,
}

impl StatusCodes {
    fn new() -> Self {
        Self {
            ok: HttpStatus::Ok.code(),
            created: HttpStatus::Created.code(),
            not_found: HttpStatus::NotFound.code(),
            unprocessable: HttpStatus::UnprocessableEntity.code(),
            server_error: HttpStatus::InternalServerError.code(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct Wording {
    pub variable: String,
    pub title: String,
    pub title_plural: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ApiControllerModel {
    pub namespace: String,
    pub class: String,
    pub base_controller: ClassRef,
    pub service: ClassRef,
    pub request: ClassRef,
    pub resource: ClassRef,
    pub wording: Wording,
    pub status: StatusCodes,
    pub per_page: u32,
}

/// Page identifiers: Inertia component paths or Blade view names.
#[derive(Debug, Serialize)]
pub(super) struct Pages {
    pub index: String,
    pub create: String,
    pub show: String,
    pub edit: String,
}

#[derive(Debug, Serialize)]
pub(super) struct Routes {
    pub index: String,
    pub show: String,
}

#[derive(Debug, Serialize)]
pub(super) struct WebControllerModel {
    pub namespace: String,
    pub class: String,
    pub style: WebRenderStyle,
    pub base_controller: ClassRef,
    pub service: ClassRef,
    pub request: ClassRef,
    pub resource: ClassRef,
    pub wording: Wording,
    pub pages: Pages,
    pub routes: Routes,
    pub per_page: u32,
}

fn base_controller(ctx: &EmitContext<'_>) -> ClassRef {
    ClassRef::new(&ctx.layout.http.join("Controllers"), "Controller".into())
}

fn wording(names: &EntityNames) -> Wording {
    Wording {
        variable: names.camel.clone(),
        title: names.title.clone(),
        title_plural: names.title_plural.clone(),
    }
}

pub(super) fn api(ctx: &EmitContext<'_>, names: &EntityNames) -> ApiControllerModel {
    let class = ctx.class_ref(ArtifactKind::ApiController);
    ApiControllerModel {
        namespace: class.namespace,
        class: class.class,
        base_controller: base_controller(ctx),
        service: ctx.class_ref(ArtifactKind::Service),
        request: ctx.class_ref(ArtifactKind::Request),
        resource: ctx.class_ref(ArtifactKind::Resource),
        wording: wording(names),
        status: StatusCodes::new(),
        per_page: ctx.options.per_page,
    }
}

pub(super) fn web(ctx: &EmitContext<'_>, names: &EntityNames) -> WebControllerModel {
    let class = ctx.class_ref(ArtifactKind::WebController);
    let style = ctx.options.web_style;
    let prefix = ctx
        .options
        .route_prefix
        .as_deref()
        .map(str::trim)
        .filter(|prefix| !prefix.is_empty());

    let page = |action: &str| match style {
        WebRenderStyle::Inertia => {
            let mut segments = Vec::new();
            if let Some(prefix) = prefix {
                segments.push(prefix.to_case(Case::Pascal));
            }
            segments.push(names.plural_class.clone());
            segments.push(action.to_case(Case::Pascal));
            segments.join("/")
        }
        WebRenderStyle::Blade => dotted(prefix, &names.kebab_plural, action),
    };

    WebControllerModel {
        namespace: class.namespace,
        class: class.class,
        style,
        base_controller: base_controller(ctx),
        service: ctx.class_ref(ArtifactKind::Service),
        request: ctx.class_ref(ArtifactKind::Request),
        resource: ctx.class_ref(ArtifactKind::Resource),
        wording: wording(names),
        pages: Pages {
            index: page("index"),
            create: page("create"),
            show: page("show"),
            edit: page("edit"),
        },
        routes: Routes {
            index: dotted(prefix, &names.kebab_plural, "index"),
            show: dotted(prefix, &names.kebab_plural, "show"),
        },
        per_page: ctx.options.per_page,
    }
}

fn dotted(prefix: Option<&str>, resource: &str, action: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}.{resource}.{action}", prefix.to_case(Case::Kebab)),
        None => format!("{resource}.{action}"),
    }
}
