//! Generator Service - main application orchestrator.
//!
//! This service coordinates one generation run:
//! 1. Resolve the entity and introspect its declaration
//! 2. Plan the artifact set (prerequisites, overwrite policies)
//! 3. Render every planned artifact
//! 4. Persist rendered artifacts in dependency order
//!
//! Failures after step 2 are recorded per artifact in the
//! [`GenerationReport`]; a failed artifact also fails its dependents, while
//! unrelated artifacts still complete.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use super::emitters::{self, EmitContext};
use super::planner::{ArtifactPlanner, PlanFlags};
use crate::{
    application::{
        ApplicationError,
        ports::{ArtifactRenderer, Confirmer, Filesystem, SchemaSource},
    },
    domain::{
        ArtifactKind, ArtifactOutcome, ArtifactState, DomainError, EmitOptions, EntityName,
        EntityNames, EntitySchema, GeneratedArtifactSpec, OverwritePolicy, PathLayout,
        introspect,
    },
    error::{StencilError, StencilResult},
};

/// What to generate in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Raw model name; `None` for project-wide artifacts.
    pub entity: Option<String>,
    /// Requested root artifacts.
    pub artifacts: Vec<ArtifactKind>,
    pub force: bool,
    pub dry_run: bool,
    pub options: EmitOptions,
}

impl GenerationRequest {
    pub fn for_entity(
        entity: impl Into<String>,
        artifacts: impl IntoIterator<Item = ArtifactKind>,
    ) -> Self {
        Self {
            entity: Some(entity.into()),
            artifacts: artifacts.into_iter().collect(),
            force: false,
            dry_run: false,
            options: EmitOptions::default(),
        }
    }

    pub fn project(artifacts: impl IntoIterator<Item = ArtifactKind>) -> Self {
        Self {
            entity: None,
            artifacts: artifacts.into_iter().collect(),
            force: false,
            dry_run: false,
            options: EmitOptions::default(),
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_options(mut self, options: EmitOptions) -> Self {
        self.options = options;
        self
    }
}

/// Outcome of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub entity: Option<String>,
    pub dry_run: bool,
    pub outcomes: Vec<ArtifactOutcome>,
}

impl GenerationReport {
    pub fn count(&self, state: ArtifactState) -> usize {
        self.outcomes.iter().filter(|o| o.state == state).count()
    }

    pub fn written(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.state == ArtifactState::Written)
    }

    pub fn failed(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.state == ArtifactState::Failed)
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }

    pub fn outcome(&self, kind: ArtifactKind) -> Option<&ArtifactOutcome> {
        self.outcomes.iter().find(|o| o.kind == kind)
    }
}

enum Rendered {
    Ready(GeneratedArtifactSpec),
    Failed(ArtifactOutcome),
}

/// Main generation service.
pub struct GeneratorService {
    schema: Box<dyn SchemaSource>,
    renderer: Box<dyn ArtifactRenderer>,
    filesystem: Box<dyn Filesystem>,
    confirmer: Box<dyn Confirmer>,
    layout: PathLayout,
    root: PathBuf,
}

impl GeneratorService {
    /// Create a new generator service with the given adapters.
    pub fn new(
        schema: Box<dyn SchemaSource>,
        renderer: Box<dyn ArtifactRenderer>,
        filesystem: Box<dyn Filesystem>,
        confirmer: Box<dyn Confirmer>,
    ) -> Self {
        Self {
            schema,
            renderer,
            filesystem,
            confirmer,
            layout: PathLayout::default(),
            root: PathBuf::new(),
        }
    }

    /// Directory layout used to place artifacts.
    pub fn with_layout(mut self, layout: PathLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Project root that relative artifact paths resolve against.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn layout(&self) -> &PathLayout {
        &self.layout
    }

    /// Run one generation.
    ///
    /// Returns `Err` only for failures that stop the run before anything is
    /// written: an invalid or undeclared entity, or a missing/declined
    /// prerequisite. Everything else lands in the report.
    #[instrument(
        skip_all,
        fields(
            entity = request.entity.as_deref().unwrap_or("-"),
            artifacts = request.artifacts.len(),
            dry_run = request.dry_run
        )
    )]
    pub fn generate(&self, request: &GenerationRequest) -> StencilResult<GenerationReport> {
        let run_id = Uuid::new_v4();
        info!(%run_id, "Starting generation");

        // 1. Resolve entity
        let entity = request
            .entity
            .as_deref()
            .map(EntityName::parse)
            .transpose()?;
        if entity.is_none() {
            if let Some(kind) = request.artifacts.iter().find(|k| k.needs_entity()) {
                return Err(DomainError::EntityRequired {
                    kind: kind.to_string(),
                }
                .into());
            }
        }
        let names = entity.as_ref().map(EntityNames::new);

        // 2. Introspect (undeclared entities halt, broken declarations do not)
        let schema = match &entity {
            Some(entity) => Some(self.load_schema(entity)?),
            None => None,
        };

        // 3. Plan
        let plan = ArtifactPlanner::new(
            self.filesystem.as_ref(),
            self.confirmer.as_ref(),
            &self.layout,
            &self.root,
        )
        .plan(
            &request.artifacts,
            names.as_ref(),
            PlanFlags {
                force: request.force,
                dry_run: request.dry_run,
            },
        )?;
        info!(planned = plan.len(), "Artifacts planned");

        // 4. Render everything before touching the filesystem
        let ctx = EmitContext {
            names: names.as_ref(),
            schema: schema.as_ref().and_then(|s| s.as_ref().ok()),
            layout: &self.layout,
            options: &request.options,
        };
        let mut failed: HashSet<ArtifactKind> = HashSet::new();
        let mut rendered = Vec::with_capacity(plan.len());

        for planned in &plan.artifacts {
            let fail = |reason: String| ArtifactOutcome {
                kind: planned.kind,
                path: planned.path.clone(),
                state: ArtifactState::Failed,
                detail: Some(reason),
                dry_run: request.dry_run,
            };

            if let Some(dep) = failed_dependency(planned.kind, &failed) {
                failed.insert(planned.kind);
                rendered.push(Rendered::Failed(fail(format!("prerequisite {dep} failed"))));
                continue;
            }

            if let (true, Some(Err(e))) = (planned.kind.needs_schema(), &schema) {
                error!(artifact = %planned.kind, error = %e, "Cannot render without schema");
                failed.insert(planned.kind);
                rendered.push(Rendered::Failed(fail(e.to_string())));
                continue;
            }

            match emitters::emit(
                planned.kind,
                planned.path.clone(),
                planned.policy,
                &ctx,
                self.renderer.as_ref(),
            ) {
                Ok(spec) => rendered.push(Rendered::Ready(spec)),
                Err(e) => {
                    error!(artifact = %planned.kind, error = %e, "Rendering failed");
                    failed.insert(planned.kind);
                    rendered.push(Rendered::Failed(fail(e.to_string())));
                }
            }
        }

        // 5. Persist in dependency order
        let mut outcomes = Vec::with_capacity(rendered.len());
        for item in rendered {
            let outcome = match item {
                Rendered::Failed(outcome) => outcome,
                Rendered::Ready(spec) => match failed_dependency(spec.kind, &failed) {
                    Some(dep) => ArtifactOutcome {
                        kind: spec.kind,
                        path: spec.target_path,
                        state: ArtifactState::Failed,
                        detail: Some(format!("prerequisite {dep} failed")),
                        dry_run: request.dry_run,
                    },
                    None => self.persist(&spec, request.dry_run),
                },
            };
            if outcome.state == ArtifactState::Failed {
                failed.insert(outcome.kind);
            }
            outcomes.push(outcome);
        }

        let report = GenerationReport {
            run_id,
            entity: entity.map(|e| e.to_string()),
            dry_run: request.dry_run,
            outcomes,
        };
        info!(
            %run_id,
            written = report.count(ArtifactState::Written),
            skipped = report.count(ArtifactState::Skipped),
            failed = report.count(ArtifactState::Failed),
            "Generation finished"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn load_schema(&self, entity: &EntityName) -> StencilResult<StencilResult<EntitySchema>> {
        let introspection_error = |reason: String| -> StencilError {
            ApplicationError::SchemaIntrospection {
                entity: entity.to_string(),
                reason,
            }
            .into()
        };

        match self.schema.definition(entity) {
            Ok(def) => Ok(introspect(&def).map_err(|e| introspection_error(e.to_string()))),
            Err(e) if e.is_entity_not_found() => Err(e),
            Err(e) => Ok(Err(introspection_error(e.to_string()))),
        }
    }

    fn persist(&self, spec: &GeneratedArtifactSpec, dry_run: bool) -> ArtifactOutcome {
        let (state, detail) = match self.try_persist(spec, dry_run) {
            Ok(result) => result,
            Err(e) => {
                error!(artifact = %spec.kind, path = %spec.target_path.display(), error = %e, "Write failed");
                (ArtifactState::Failed, Some(e.to_string()))
            }
        };

        ArtifactOutcome {
            kind: spec.kind,
            path: spec.target_path.clone(),
            state,
            detail,
            dry_run,
        }
    }

    /// Drive one artifact through its lifecycle.
    fn try_persist(
        &self,
        spec: &GeneratedArtifactSpec,
        dry_run: bool,
    ) -> StencilResult<(ArtifactState, Option<String>)> {
        let full_path = self.root.join(&spec.target_path);
        let state = ArtifactState::Planned.transition(ArtifactState::ExistsCheck)?;
        let exists = self.filesystem.exists(&full_path);

        let state = if !exists {
            state
        } else {
            match spec.overwrite_policy {
                OverwritePolicy::ForceAlways => state,
                OverwritePolicy::SkipIfExists => {
                    debug!(path = %spec.target_path.display(), "Already exists, skipping");
                    return Ok((
                        state.transition(ArtifactState::Skipped)?,
                        Some("already exists".into()),
                    ));
                }
                OverwritePolicy::PromptIfExists => {
                    let state = state.transition(ArtifactState::PromptedOverwrite)?;
                    if dry_run {
                        return Ok((
                            state.transition(ArtifactState::Skipped)?,
                            Some("exists, would ask before overwriting".into()),
                        ));
                    }

                    let question = format!(
                        "{} already exists. Overwrite?",
                        spec.target_path.display()
                    );
                    if !self.confirmer.confirm(&question, false)? {
                        info!(path = %spec.target_path.display(), "Overwrite declined");
                        return Ok((
                            state.transition(ArtifactState::Skipped)?,
                            Some("overwrite declined".into()),
                        ));
                    }
                    state
                }
            }
        };

        if dry_run {
            return Ok((
                state.transition(ArtifactState::Written)?,
                Some("dry run, nothing written".into()),
            ));
        }

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem
            .write_file(&full_path, &spec.rendered_content)?;
        debug!(path = %spec.target_path.display(), "Artifact written");

        let detail = exists.then(|| "overwritten".to_string());
        Ok((state.transition(ArtifactState::Written)?, detail))
    }
}

fn failed_dependency(kind: ArtifactKind, failed: &HashSet<ArtifactKind>) -> Option<ArtifactKind> {
    kind.dependencies()
        .iter()
        .map(|d| d.kind)
        .find(|dep| failed.contains(dep))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use serde_json::Value;

    use super::*;
    use crate::application::ports::{MockArtifactRenderer, MockConfirmer, MockSchemaSource};
    use crate::domain::{ColumnDefinition, EntityDefinition};

    /// Filesystem fake that records writes.
    #[derive(Clone, Default)]
    struct RecordingFs {
        files: Arc<Mutex<HashMap<PathBuf, String>>>,
    }

    impl RecordingFs {
        fn with_file(self, path: &str, content: &str) -> Self {
            self.files
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), content.into());
            self
        }

        fn read(&self, path: &str) -> Option<String> {
            self.files.lock().unwrap().get(Path::new(path)).cloned()
        }
    }

    impl Filesystem for RecordingFs {
        fn create_dir_all(&self, _path: &Path) -> StencilResult<()> {
            Ok(())
        }

        fn write_file(&self, path: &Path, content: &str) -> StencilResult<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.into());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }
    }

    fn author_source() -> MockSchemaSource {
        let mut source = MockSchemaSource::new();
        source.expect_definition().returning(|entity| {
            if entity.as_str() == "Author" {
                Ok(EntityDefinition::new(entity.clone())
                    .column(ColumnDefinition::new("name", "varchar(255)")))
            } else {
                Err(ApplicationError::EntityNotFound {
                    entity: entity.to_string(),
                }
                .into())
            }
        });
        source
    }

    fn echo_renderer() -> MockArtifactRenderer {
        let mut renderer = MockArtifactRenderer::new();
        renderer
            .expect_render()
            .returning(|template: &str, model: &Value| {
                Ok(format!("{template}:{}", model["class"].as_str().unwrap_or("-")))
            });
        renderer
    }

    fn confirmer(answer: bool) -> MockConfirmer {
        let mut confirmer = MockConfirmer::new();
        confirmer.expect_confirm().returning(move |_, _| Ok(answer));
        confirmer
    }

    fn service(fs: RecordingFs, answer: bool) -> GeneratorService {
        GeneratorService::new(
            Box::new(author_source()),
            Box::new(echo_renderer()),
            Box::new(fs),
            Box::new(confirmer(answer)),
        )
    }

    #[test]
    fn writes_planned_artifacts_in_order() {
        let fs = RecordingFs::default();
        let report = service(fs.clone(), true)
            .generate(&GenerationRequest::for_entity(
                "Author",
                [ArtifactKind::Dto, ArtifactKind::RequestDto],
            ))
            .unwrap();

        let kinds: Vec<_> = report.outcomes.iter().map(|o| o.kind).collect();
        assert_eq!(
            kinds,
            [ArtifactKind::BaseDto, ArtifactKind::Dto, ArtifactKind::RequestDto]
        );
        assert_eq!(report.count(ArtifactState::Written), 3);
        assert_eq!(
            fs.read("app/DTO/AuthorDto.php").as_deref(),
            Some("dto.php.j2:AuthorDto")
        );
    }

    #[test]
    fn undeclared_entity_halts_before_planning() {
        let err = service(RecordingFs::default(), true)
            .generate(&GenerationRequest::for_entity("Ghost", [ArtifactKind::Repository]))
            .unwrap_err();
        assert!(err.is_entity_not_found());
    }

    #[test]
    fn declined_overwrite_leaves_file_unchanged() {
        let fs = RecordingFs::default().with_file("app/Repositories/AuthorRepository.php", "original");
        let report = service(fs.clone(), false)
            .generate(&GenerationRequest::for_entity("Author", [ArtifactKind::Repository]))
            .unwrap();

        let outcome = report.outcome(ArtifactKind::Repository).unwrap();
        assert_eq!(outcome.state, ArtifactState::Skipped);
        assert_eq!(outcome.detail.as_deref(), Some("overwrite declined"));
        assert!(!report.has_failures());
        assert_eq!(
            fs.read("app/Repositories/AuthorRepository.php").as_deref(),
            Some("original")
        );
    }

    #[test]
    fn force_overwrites_without_prompting() {
        let fs = RecordingFs::default().with_file("app/Repositories/AuthorRepository.php", "original");
        let mut never = MockConfirmer::new();
        never.expect_confirm().never();
        let service = GeneratorService::new(
            Box::new(author_source()),
            Box::new(echo_renderer()),
            Box::new(fs.clone()),
            Box::new(never),
        );

        let report = service
            .generate(&GenerationRequest::for_entity("Author", [ArtifactKind::Repository]).force(true))
            .unwrap();

        assert_eq!(
            report.outcome(ArtifactKind::Repository).unwrap().detail.as_deref(),
            Some("overwritten")
        );
        assert_eq!(
            fs.read("app/Repositories/AuthorRepository.php").as_deref(),
            Some("repository.php.j2:AuthorRepository")
        );
    }

    #[test]
    fn dry_run_touches_nothing() {
        let fs = RecordingFs::default();
        let mut never = MockConfirmer::new();
        never.expect_confirm().never();
        let service = GeneratorService::new(
            Box::new(author_source()),
            Box::new(echo_renderer()),
            Box::new(fs.clone()),
            Box::new(never),
        );

        let report = service
            .generate(&GenerationRequest::for_entity("Author", [ArtifactKind::Dto]).dry_run(true))
            .unwrap();

        assert!(report.dry_run);
        assert!(report.outcomes.iter().all(|o| o.dry_run));
        assert!(fs.files.lock().unwrap().is_empty());
    }

    #[test]
    fn render_failure_cascades_to_dependents_only() {
        let fs = RecordingFs::default().with_file("app/DTO/BaseDto.php", "base");
        let mut renderer = MockArtifactRenderer::new();
        renderer.expect_render().returning(|template: &str, _: &Value| {
            if template == "repository.php.j2" {
                Err(ApplicationError::RenderingFailed {
                    template: template.into(),
                    reason: "boom".into(),
                }
                .into())
            } else {
                Ok(template.to_string())
            }
        });
        let service = GeneratorService::new(
            Box::new(author_source()),
            Box::new(renderer),
            Box::new(fs.clone()),
            Box::new(confirmer(true)),
        );

        let report = service
            .generate(&GenerationRequest::for_entity(
                "Author",
                [ArtifactKind::Dto, ArtifactKind::Repository, ArtifactKind::Service],
            ))
            .unwrap();

        assert_eq!(report.outcome(ArtifactKind::Dto).unwrap().state, ArtifactState::Written);
        assert_eq!(
            report.outcome(ArtifactKind::Repository).unwrap().state,
            ArtifactState::Failed
        );
        let service_outcome = report.outcome(ArtifactKind::Service).unwrap();
        assert_eq!(service_outcome.state, ArtifactState::Failed);
        assert_eq!(
            service_outcome.detail.as_deref(),
            Some("prerequisite repository failed")
        );
        assert!(fs.read("app/Services/AuthorService.php").is_none());
    }

    #[test]
    fn broken_declaration_fails_schema_artifacts_only() {
        let mut source = MockSchemaSource::new();
        source.expect_definition().returning(|entity| {
            Ok(EntityDefinition::new(entity.clone())
                .column(ColumnDefinition::new("name", "text"))
                .column(ColumnDefinition::new("name", "text")))
        });
        let fs = RecordingFs::default().with_file("app/DTO/BaseDto.php", "base");
        let service = GeneratorService::new(
            Box::new(source),
            Box::new(echo_renderer()),
            Box::new(fs),
            Box::new(confirmer(true)),
        );

        let report = service
            .generate(&GenerationRequest::for_entity(
                "Author",
                [ArtifactKind::Dto, ArtifactKind::Repository],
            ))
            .unwrap();

        let dto = report.outcome(ArtifactKind::Dto).unwrap();
        assert_eq!(dto.state, ArtifactState::Failed);
        assert!(dto.detail.as_deref().unwrap().contains("declared more than once"));
        assert_eq!(
            report.outcome(ArtifactKind::Repository).unwrap().state,
            ArtifactState::Written
        );
    }

    #[test]
    fn project_artifacts_need_no_entity() {
        let fs = RecordingFs::default().with_file(".stencil.toml", "existing");
        let report = service(fs.clone(), true)
            .generate(&GenerationRequest::project([
                ArtifactKind::GeneratorConfig,
                ArtifactKind::BaseDto,
            ]))
            .unwrap();

        assert_eq!(
            report.outcome(ArtifactKind::GeneratorConfig).unwrap().state,
            ArtifactState::Skipped
        );
        assert_eq!(
            report.outcome(ArtifactKind::BaseDto).unwrap().state,
            ArtifactState::Written
        );
        assert_eq!(fs.read(".stencil.toml").as_deref(), Some("existing"));
    }

    #[test]
    fn entity_artifacts_without_entity_are_rejected() {
        let err = service(RecordingFs::default(), true)
            .generate(&GenerationRequest::project([ArtifactKind::Repository]))
            .unwrap_err();
        assert!(matches!(err, StencilError::Domain(DomainError::EntityRequired { .. })));
    }
}
