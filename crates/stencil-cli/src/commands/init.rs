//! `stencil make:generator-init`: write `.stencil.toml` and the shared
//! `BaseDto` class.

use stencil_core::prelude::*;

use crate::{
    cli::{GeneratorInitArgs, GlobalArgs},
    commands::make::generate,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: GeneratorInitArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    if !output.is_json() {
        output.info("Initialising the generator...")?;
    }

    let layout = config.layout();
    let schema_dir = layout.schema_dir.clone();
    let request =
        GenerationRequest::project([ArtifactKind::GeneratorConfig, ArtifactKind::BaseDto])
            .force(args.force.force)
            .with_options(config.emit_options());
    generate(request, layout, global, config, output)?;

    if !global.dry_run && !output.is_json() {
        output.print(&format!(
            "Declare entities as TOML manifests in {}/, e.g. {}/Author.toml",
            schema_dir.display(),
            schema_dir.display()
        ))?;
    }
    Ok(())
}
