//! Artifact kinds, their dependency graph, target paths and lifecycle.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::error::DomainError;
use super::naming::EntityNames;
use super::value_objects::{OverwritePolicy, WebRenderStyle};

// ============================================================================
// ArtifactKind
// ============================================================================

/// Every file the generator knows how to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    GeneratorConfig,
    BaseDto,
    Dto,
    RequestDto,
    Request,
    Resource,
    Repository,
    Service,
    ApiController,
    WebController,
}

/// How a missing prerequisite is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyPolicy {
    /// Offer to generate it in the same run.
    Chain,
    /// Abort with a remediation command.
    Require,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    pub kind: ArtifactKind,
    pub policy: DependencyPolicy,
}

const fn chain(kind: ArtifactKind) -> Dependency {
    Dependency { kind, policy: DependencyPolicy::Chain }
}

const fn require(kind: ArtifactKind) -> Dependency {
    Dependency { kind, policy: DependencyPolicy::Require }
}

impl ArtifactKind {
    pub const ALL: [Self; 10] = [
        Self::GeneratorConfig,
        Self::BaseDto,
        Self::Dto,
        Self::RequestDto,
        Self::Request,
        Self::Resource,
        Self::Repository,
        Self::Service,
        Self::ApiController,
        Self::WebController,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GeneratorConfig => "generator-config",
            Self::BaseDto => "base-dto",
            Self::Dto => "dto",
            Self::RequestDto => "request-dto",
            Self::Request => "request",
            Self::Resource => "resource",
            Self::Repository => "repository",
            Self::Service => "service",
            Self::ApiController => "api-controller",
            Self::WebController => "web-controller",
        }
    }

    /// Template used to render this kind.
    pub const fn template(self) -> &'static str {
        match self {
            Self::GeneratorConfig => "stencil.toml.j2",
            Self::BaseDto => "base_dto.php.j2",
            Self::Dto => "dto.php.j2",
            Self::RequestDto => "request_dto.php.j2",
            Self::Request => "request.php.j2",
            Self::Resource => "resource.php.j2",
            Self::Repository => "repository.php.j2",
            Self::Service => "service.php.j2",
            Self::ApiController => "api_controller.php.j2",
            Self::WebController => "web_controller.php.j2",
        }
    }

    /// Project-wide artifacts that are not tied to an entity.
    pub const fn is_init(self) -> bool {
        matches!(self, Self::GeneratorConfig | Self::BaseDto)
    }

    pub const fn needs_entity(self) -> bool {
        !self.is_init()
    }

    /// Whether rendering reads the entity's column descriptors.
    pub const fn needs_schema(self) -> bool {
        matches!(self, Self::Dto | Self::RequestDto)
    }

    /// Prerequisites, in the order they are checked.
    pub const fn dependencies(self) -> &'static [Dependency] {
        const DTO: &[Dependency] = &[chain(ArtifactKind::BaseDto)];
        const REQUEST: &[Dependency] = &[require(ArtifactKind::RequestDto)];
        const RESOURCE: &[Dependency] = &[require(ArtifactKind::Dto)];
        const SERVICE: &[Dependency] = &[chain(ArtifactKind::Repository)];
        const API_CONTROLLER: &[Dependency] = &[
            require(ArtifactKind::Request),
            require(ArtifactKind::Resource),
            chain(ArtifactKind::Service),
        ];
        const WEB_CONTROLLER: &[Dependency] = &[
            require(ArtifactKind::Request),
            require(ArtifactKind::Resource),
            chain(ArtifactKind::Service),
        ];

        match self {
            Self::Dto | Self::RequestDto => DTO,
            Self::Request => REQUEST,
            Self::Resource => RESOURCE,
            Self::Service => SERVICE,
            Self::ApiController => API_CONTROLLER,
            Self::WebController => WEB_CONTROLLER,
            Self::GeneratorConfig | Self::BaseDto | Self::Repository => &[],
        }
    }

    /// Class (or file) name this kind produces for an entity.
    pub fn class_name(self, names: Option<&EntityNames>) -> String {
        let Some(names) = names else {
            return match self {
                Self::GeneratorConfig => ".stencil.toml".into(),
                _ => "BaseDto".into(),
            };
        };

        match self {
            Self::GeneratorConfig => ".stencil.toml".into(),
            Self::BaseDto => "BaseDto".into(),
            Self::Dto => names.dto.clone(),
            Self::RequestDto => names.request_dto.clone(),
            Self::Request => names.request.clone(),
            Self::Resource => names.resource.clone(),
            Self::Repository => names.repository.clone(),
            Self::Service => names.service.clone(),
            Self::ApiController | Self::WebController => names.controller.clone(),
        }
    }

    /// Command that creates this artifact on its own.
    pub fn remediation(self, names: Option<&EntityNames>) -> String {
        let class = names.map(|n| n.class.as_str()).unwrap_or("<Model>");
        match self {
            Self::GeneratorConfig | Self::BaseDto => "make:generator-init".into(),
            Self::Dto | Self::RequestDto => format!("make:dto {class}"),
            Self::Request | Self::Resource => format!("make:api-classes {class}Dto"),
            Self::Repository => format!("make:repository {class}"),
            Self::Service => format!("make:db-controller {class}"),
            Self::ApiController => format!("make:api-controller {class}"),
            Self::WebController => format!("make:web-controller {class}"),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PathLayout
// ============================================================================

/// Project-relative directories artifacts are written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathLayout {
    pub models: PathBuf,
    pub dto: PathBuf,
    pub http: PathBuf,
    pub api_controllers: PathBuf,
    pub web_controllers: PathBuf,
    pub services: PathBuf,
    pub repositories: PathBuf,
    pub schema_dir: PathBuf,
    pub config_file: PathBuf,
    /// Optional sub-namespace for API controllers (`--module`).
    pub api_module: Option<String>,
}

impl Default for PathLayout {
    fn default() -> Self {
        Self {
            models: PathBuf::from("app/Models"),
            dto: PathBuf::from("app/DTO"),
            http: PathBuf::from("app/Http"),
            api_controllers: PathBuf::from("app/Http/Controllers/Api"),
            web_controllers: PathBuf::from("app/Http/Controllers/Web"),
            services: PathBuf::from("app/Services"),
            repositories: PathBuf::from("app/Repositories"),
            schema_dir: PathBuf::from("stencil/schema"),
            config_file: PathBuf::from(".stencil.toml"),
            api_module: None,
        }
    }
}

impl PathLayout {
    pub fn requests(&self) -> PathBuf {
        self.http.join("Requests")
    }

    pub fn resources(&self) -> PathBuf {
        self.http.join("Resources")
    }

    /// Directory holding a kind's file.
    pub fn dir_for(&self, kind: ArtifactKind) -> PathBuf {
        match kind {
            ArtifactKind::GeneratorConfig => self
                .config_file
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            ArtifactKind::BaseDto | ArtifactKind::Dto | ArtifactKind::RequestDto => {
                self.dto.clone()
            }
            ArtifactKind::Request => self.requests(),
            ArtifactKind::Resource => self.resources(),
            ArtifactKind::Repository => self.repositories.clone(),
            ArtifactKind::Service => self.services.clone(),
            ArtifactKind::ApiController => match &self.api_module {
                Some(module) => self.api_controllers.join(module),
                None => self.api_controllers.clone(),
            },
            ArtifactKind::WebController => self.web_controllers.clone(),
        }
    }

    /// Project-relative target path for a kind.
    pub fn path_for(&self, kind: ArtifactKind, names: Option<&EntityNames>) -> PathBuf {
        match kind {
            ArtifactKind::GeneratorConfig => self.config_file.clone(),
            _ => self
                .dir_for(kind)
                .join(format!("{}.php", kind.class_name(names))),
        }
    }
}

// ============================================================================
// EmitOptions
// ============================================================================

/// Per-run knobs that change emitted content but not the artifact set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmitOptions {
    pub web_style: WebRenderStyle,
    pub route_prefix: Option<String>,
    pub cache_ttl_seconds: u32,
    pub per_page: u32,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            web_style: WebRenderStyle::default(),
            route_prefix: None,
            cache_ttl_seconds: 3600,
            per_page: 15,
        }
    }
}

// ============================================================================
// GeneratedArtifactSpec
// ============================================================================

/// A fully rendered artifact waiting to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifactSpec {
    pub kind: ArtifactKind,
    pub target_path: PathBuf,
    pub overwrite_policy: OverwritePolicy,
    pub rendered_content: String,
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Per-artifact state.
///
/// `Planned → ExistsCheck → (Written | PromptedOverwrite | Skipped)` and
/// `PromptedOverwrite → (Written | Skipped)`. `Failed` is reachable from any
/// non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactState {
    Planned,
    ExistsCheck,
    PromptedOverwrite,
    Skipped,
    Written,
    Failed,
}

impl ArtifactState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::ExistsCheck => "exists-check",
            Self::PromptedOverwrite => "prompted-overwrite",
            Self::Skipped => "skipped",
            Self::Written => "written",
            Self::Failed => "failed",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Skipped | Self::Written | Self::Failed)
    }

    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (_, Self::Failed) => !self.is_terminal(),
            (Self::Planned, Self::ExistsCheck) => true,
            (Self::ExistsCheck, Self::Written | Self::Skipped | Self::PromptedOverwrite) => true,
            (Self::PromptedOverwrite, Self::Written | Self::Skipped) => true,
            _ => false,
        }
    }

    pub fn transition(self, next: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::IllegalTransition {
                from: self.as_str().into(),
                to: next.as_str().into(),
            })
        }
    }
}

impl fmt::Display for ArtifactState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final result for one artifact in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactOutcome {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub state: ArtifactState,
    /// Reason for skips and failures; `None` for plain writes.
    pub detail: Option<String>,
    /// Set in dry runs where nothing was touched.
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::naming::EntityName;

    fn names(raw: &str) -> EntityNames {
        EntityNames::new(&EntityName::parse(raw).unwrap())
    }

    #[test]
    fn default_paths_follow_laravel_layout() {
        let layout = PathLayout::default();
        let n = names("Author");

        assert_eq!(layout.path_for(ArtifactKind::Dto, Some(&n)), PathBuf::from("app/DTO/AuthorDto.php"));
        assert_eq!(
            layout.path_for(ArtifactKind::Request, Some(&n)),
            PathBuf::from("app/Http/Requests/AuthorRequest.php")
        );
        assert_eq!(
            layout.path_for(ArtifactKind::WebController, Some(&n)),
            PathBuf::from("app/Http/Controllers/Web/AuthorController.php")
        );
        assert_eq!(layout.path_for(ArtifactKind::BaseDto, None), PathBuf::from("app/DTO/BaseDto.php"));
        assert_eq!(layout.path_for(ArtifactKind::GeneratorConfig, None), PathBuf::from(".stencil.toml"));
    }

    #[test]
    fn api_module_nests_controllers() {
        let layout = PathLayout {
            api_module: Some("Billing".into()),
            ..PathLayout::default()
        };
        assert_eq!(
            layout.path_for(ArtifactKind::ApiController, Some(&names("Invoice"))),
            PathBuf::from("app/Http/Controllers/Api/Billing/InvoiceController.php")
        );
    }

    #[test]
    fn remediation_names_the_right_command() {
        let n = names("Widget");
        assert_eq!(ArtifactKind::Request.remediation(Some(&n)), "make:api-classes WidgetDto");
        assert_eq!(ArtifactKind::RequestDto.remediation(Some(&n)), "make:dto Widget");
        assert_eq!(ArtifactKind::BaseDto.remediation(None), "make:generator-init");
    }

    #[test]
    fn dependency_graph_is_acyclic() {
        fn depth(kind: ArtifactKind, budget: usize) -> bool {
            budget > 0 && kind.dependencies().iter().all(|d| depth(d.kind, budget - 1))
        }
        for kind in ArtifactKind::ALL {
            assert!(depth(kind, ArtifactKind::ALL.len()), "{kind} has a cycle");
        }
    }

    #[test]
    fn lifecycle_transitions() {
        use ArtifactState::*;

        assert_eq!(Planned.transition(ExistsCheck), Ok(ExistsCheck));
        assert_eq!(ExistsCheck.transition(PromptedOverwrite), Ok(PromptedOverwrite));
        assert_eq!(PromptedOverwrite.transition(Skipped), Ok(Skipped));
        assert_eq!(Planned.transition(Failed), Ok(Failed));

        assert!(Planned.transition(Written).is_err());
        assert!(Written.transition(Failed).is_err());
        assert!(Skipped.transition(Written).is_err());
    }
}
