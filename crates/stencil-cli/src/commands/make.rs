//! `stencil make:*`: artifact generators.
//!
//! Each handler only decides which artifacts are roots and how the layout
//! and emit options are tweaked by its flags; planning, prompting and
//! writing happen in [`GeneratorService`].

use stencil_adapters::{FixedConfirmer, LocalFilesystem, ManifestSchemaSource, MiniJinjaRenderer};
use stencil_core::prelude::*;
use tracing::{debug, instrument};

use crate::{
    cli::{
        GlobalArgs, MakeApiClassesArgs, MakeApiControllerArgs, MakeDbControllerArgs, MakeDtoArgs,
        MakeRepositoryArgs, MakeWebControllerArgs,
    },
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::TerminalConfirmer,
};

/// Artifacts produced by `make:db-controller` (without `--web`).
const FULL_STACK: [ArtifactKind; 7] = [
    ArtifactKind::Dto,
    ArtifactKind::RequestDto,
    ArtifactKind::Request,
    ArtifactKind::Resource,
    ArtifactKind::Repository,
    ArtifactKind::Service,
    ArtifactKind::ApiController,
];

// ── Handlers ─────────────────────────────────────────────────────────────────

pub fn dto(
    args: MakeDtoArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let mut layout = config.layout();
    if let Some(path) = args.path {
        layout.dto = path;
    }
    let request = GenerationRequest::for_entity(
        &args.model,
        [ArtifactKind::Dto, ArtifactKind::RequestDto],
    )
    .force(args.force.force)
    .with_options(config.emit_options());
    generate(request, layout, global, config, output)
}

pub fn api_classes(
    args: MakeApiClassesArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let entity = EntityName::from_dto_name(&args.dto).map_err(StencilError::from)?;
    let mut layout = config.layout();
    if let Some(path) = args.path {
        layout.http = path;
    }
    let request = GenerationRequest::for_entity(
        entity.as_str(),
        [ArtifactKind::Request, ArtifactKind::Resource],
    )
    .force(args.force.force)
    .with_options(config.emit_options());
    generate(request, layout, global, config, output)
}

pub fn api_controller(
    args: MakeApiControllerArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let mut layout = config.layout();
    if let Some(path) = args.path {
        layout.api_controllers = path;
    }
    layout.api_module = args.module.filter(|m| !m.trim().is_empty());
    let request = GenerationRequest::for_entity(&args.entity, [ArtifactKind::ApiController])
        .force(args.force.force)
        .with_options(config.emit_options());
    generate(request, layout, global, config, output)
}

pub fn db_controller(
    args: MakeDbControllerArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let mut kinds = FULL_STACK.to_vec();
    if args.web {
        kinds.push(ArtifactKind::WebController);
    }
    let request = GenerationRequest::for_entity(&args.model, kinds)
        .force(args.force.force)
        .with_options(config.emit_options());
    generate(request, config.layout(), global, config, output)
}

pub fn web_controller(
    args: MakeWebControllerArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let mut options = config.emit_options();
    options.web_style = match (args.inertia, args.blade) {
        (false, true) => WebRenderStyle::Blade,
        _ => WebRenderStyle::Inertia,
    };
    options.route_prefix = args
        .prefix
        .map(|p| p.trim().trim_matches('/').to_string())
        .filter(|p| !p.is_empty());

    let request = GenerationRequest::for_entity(&args.model, [ArtifactKind::WebController])
        .force(args.force.force)
        .with_options(options);
    generate(request, config.layout(), global, config, output)
}

pub fn repository(
    args: MakeRepositoryArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let request = GenerationRequest::for_entity(&args.model, [ArtifactKind::Repository])
        .force(args.force.force)
        .with_options(config.emit_options());
    generate(request, config.layout(), global, config, output)
}

// ── Shared plumbing ──────────────────────────────────────────────────────────

/// Wire the adapters together for one run.
pub(crate) fn build_generator(
    layout: PathLayout,
    global: &GlobalArgs,
    config: &AppConfig,
) -> CliResult<GeneratorService> {
    let renderer = match &config.templates.local_path {
        Some(dir) => {
            debug!(dir = %dir.display(), "Using template overrides");
            MiniJinjaRenderer::with_overrides(dir)?
        }
        None => MiniJinjaRenderer::with_builtin()?,
    };

    let confirmer: Box<dyn Confirmer> = if global.no_interaction {
        Box::new(FixedConfirmer::reject_all())
    } else {
        Box::new(TerminalConfirmer::new())
    };

    let schema = ManifestSchemaSource::new(layout.schema_dir.clone());

    Ok(GeneratorService::new(
        Box::new(schema),
        Box::new(renderer),
        Box::new(LocalFilesystem::new()),
        confirmer,
    )
    .with_layout(layout))
}

/// Run a request and report its outcome.
#[instrument(skip_all, fields(entity = request.entity.as_deref().unwrap_or("-")))]
pub(crate) fn generate(
    request: GenerationRequest,
    layout: PathLayout,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let request = request.dry_run(global.dry_run);

    let report = build_generator(layout, global, config)?.generate(&request)?;
    print_report(&report, output)?;

    let result = match report.failed().next() {
        Some(first) => Err(CliError::ArtifactsFailed {
            failed: report.count(ArtifactState::Failed),
            first: format!(
                "{}: {}",
                first.path.display(),
                first.detail.as_deref().unwrap_or("unknown error")
            ),
        }),
        None => Ok(()),
    };
    result
}

/// One line per artifact, then a summary.
pub(crate) fn print_report(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        return output.json(report);
    }

    if report.dry_run {
        output.header("Dry run: nothing will be written")?;
    }

    for outcome in &report.outcomes {
        let path = outcome.path.display();
        match outcome.state {
            ArtifactState::Written if outcome.dry_run => {
                output.info(&format!("Would write {path}"))?;
            }
            ArtifactState::Written => match outcome.detail.as_deref() {
                Some(detail) => output.success(&format!("Wrote {path} ({detail})"))?,
                None => output.success(&format!("Created {path}"))?,
            },
            ArtifactState::Skipped => output.warning(&format!(
                "Skipped {path} ({})",
                outcome.detail.as_deref().unwrap_or("unchanged")
            ))?,
            ArtifactState::Failed => output.error(&format!(
                "Failed {path}: {}",
                outcome.detail.as_deref().unwrap_or("unknown error")
            ))?,
            _ => {}
        }
    }

    output.print(&format!(
        "{} written, {} skipped, {} failed",
        report.count(ArtifactState::Written),
        report.count(ArtifactState::Skipped),
        report.count(ArtifactState::Failed),
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_stack_ends_with_the_api_controller() {
        assert_eq!(FULL_STACK.last(), Some(&ArtifactKind::ApiController));
        assert!(!FULL_STACK.contains(&ArtifactKind::WebController));
    }

    #[test]
    fn builtin_generator_builds_without_overrides() {
        let global = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            no_interaction: true,
            dry_run: true,
            output_format: crate::cli::OutputFormat::Plain,
        };
        let config = AppConfig::default();
        let service = build_generator(config.layout(), &global, &config).unwrap();
        assert_eq!(service.layout().dto, std::path::PathBuf::from("app/DTO"));
    }
}
