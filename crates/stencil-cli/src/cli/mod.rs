//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate Laravel DTOs, requests, resources, repositories and controllers from entity declarations",
    long_about = "Stencil reads entity declarations from TOML manifests and emits \
                  typed PHP artifacts whose validation rules, OpenAPI annotations \
                  and class names all agree with each other.",
    after_help = "EXAMPLES:\n\
        \x20 stencil make:generator-init\n\
        \x20 stencil make:dto Author\n\
        \x20 stencil make:api-classes AuthorDto\n\
        \x20 stencil make:db-controller Author --web\n\
        \x20 stencil schema:show Author --format json",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the DTO and request DTO for a model.
    #[command(
        name = "make:dto",
        about = "Generate <Model>Dto and <Model>RequestDto",
        after_help = "EXAMPLES:\n\
            \x20 stencil make:dto Author\n\
            \x20 stencil make:dto BlogPost --path app/Data --force"
    )]
    MakeDto(MakeDtoArgs),

    /// Generate the form request and API resource for a DTO.
    #[command(
        name = "make:api-classes",
        about = "Generate <Model>Request and <Model>Resource",
        after_help = "EXAMPLES:\n\
            \x20 stencil make:api-classes AuthorDto"
    )]
    MakeApiClasses(MakeApiClassesArgs),

    /// Generate a JSON API controller.
    #[command(
        name = "make:api-controller",
        about = "Generate an API controller",
        after_help = "EXAMPLES:\n\
            \x20 stencil make:api-controller Author\n\
            \x20 stencil make:api-controller Author --module V1"
    )]
    MakeApiController(MakeApiControllerArgs),

    /// Generate the whole stack for a model.
    #[command(
        name = "make:db-controller",
        about = "Generate DTOs, requests, resources, repository, service and controllers",
        after_help = "EXAMPLES:\n\
            \x20 stencil make:db-controller Author\n\
            \x20 stencil make:db-controller Author --web"
    )]
    MakeDbController(MakeDbControllerArgs),

    /// Generate an Inertia or Blade web controller.
    #[command(
        name = "make:web-controller",
        about = "Generate a web controller",
        after_help = "EXAMPLES:\n\
            \x20 stencil make:web-controller Author\n\
            \x20 stencil make:web-controller Author --blade --prefix admin"
    )]
    MakeWebController(MakeWebControllerArgs),

    /// Generate a cached repository.
    #[command(name = "make:repository", about = "Generate a cached repository")]
    MakeRepository(MakeRepositoryArgs),

    /// Write the generator config and the shared DTO base class.
    #[command(
        name = "make:generator-init",
        about = "Initialise the generator in this project"
    )]
    MakeGeneratorInit(GeneratorInitArgs),

    /// List declared entities.
    #[command(name = "schema:list", visible_alias = "ls", about = "List declared entities")]
    SchemaList,

    /// Show the columns, relations and rules of one entity.
    #[command(
        name = "schema:show",
        about = "Show an entity's introspected schema",
        after_help = "EXAMPLES:\n\
            \x20 stencil schema:show Author\n\
            \x20 stencil schema:show Author --format json"
    )]
    SchemaShow(SchemaShowArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Stencil configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stencil config get paths.dto\n\
            \x20 stencil config list\n\
            \x20 stencil config path"
    )]
    Config(ConfigCommands),
}

// ── make:* ────────────────────────────────────────────────────────────────────

/// Overwrite switch shared by every generator.
#[derive(Debug, Clone, Copy, Args)]
pub struct ForceArg {
    /// Overwrite existing files and generate missing prerequisites without
    /// asking.
    #[arg(short = 'f', long = "force", help = "Overwrite existing files")]
    pub force: bool,
}

/// Arguments for `stencil make:dto`.
#[derive(Debug, Args)]
pub struct MakeDtoArgs {
    #[arg(value_name = "MODEL", help = "Model name, e.g. Author")]
    pub model: String,

    #[arg(long = "path", value_name = "DIR", help = "DTO directory (default: app/DTO)")]
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub force: ForceArg,
}

/// Arguments for `stencil make:api-classes`.
#[derive(Debug, Args)]
pub struct MakeApiClassesArgs {
    /// DTO class name; the `Dto` suffix is optional.
    #[arg(value_name = "DTO", help = "DTO name, e.g. AuthorDto")]
    pub dto: String,

    #[arg(long = "path", value_name = "DIR", help = "HTTP directory (default: app/Http)")]
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub force: ForceArg,
}

/// Arguments for `stencil make:api-controller`.
#[derive(Debug, Args)]
pub struct MakeApiControllerArgs {
    #[arg(value_name = "ENTITY", help = "Entity name, e.g. Author")]
    pub entity: String,

    #[arg(
        long = "module",
        value_name = "MODULE",
        help = "Sub-namespace under the API controllers directory"
    )]
    pub module: Option<String>,

    #[arg(
        long = "path",
        value_name = "DIR",
        help = "API controller directory (default: app/Http/Controllers/Api)"
    )]
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub force: ForceArg,
}

/// Arguments for `stencil make:db-controller`.
#[derive(Debug, Args)]
pub struct MakeDbControllerArgs {
    #[arg(value_name = "MODEL", help = "Model name, e.g. Author")]
    pub model: String,

    #[arg(long = "web", help = "Also generate the web controller")]
    pub web: bool,

    #[command(flatten)]
    pub force: ForceArg,
}

/// Arguments for `stencil make:web-controller`.
#[derive(Debug, Args)]
pub struct MakeWebControllerArgs {
    #[arg(value_name = "MODEL", help = "Model name, e.g. Author")]
    pub model: String,

    #[arg(long = "inertia", conflicts_with = "blade", help = "Render Inertia pages (default)")]
    pub inertia: bool,

    #[arg(long = "blade", help = "Render Blade views")]
    pub blade: bool,

    #[arg(
        long = "prefix",
        value_name = "PREFIX",
        help = "Route and page prefix, e.g. admin"
    )]
    pub prefix: Option<String>,

    #[command(flatten)]
    pub force: ForceArg,
}

/// Arguments for `stencil make:repository`.
#[derive(Debug, Args)]
pub struct MakeRepositoryArgs {
    #[arg(value_name = "MODEL", help = "Model name, e.g. Author")]
    pub model: String,

    #[command(flatten)]
    pub force: ForceArg,
}

/// Arguments for `stencil make:generator-init`.
#[derive(Debug, Args)]
pub struct GeneratorInitArgs {
    #[command(flatten)]
    pub force: ForceArg,
}

// ── schema:* ──────────────────────────────────────────────────────────────────

/// Arguments for `stencil schema:show`.
#[derive(Debug, Args)]
pub struct SchemaShowArgs {
    #[arg(value_name = "MODEL", help = "Model name, e.g. Author")]
    pub model: String,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: SchemaFormat,
}

/// Output format for `schema:show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaFormat {
    /// Human-readable table.
    Table,
    /// JSON document.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stencil config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `paths.dto`.
        key: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the configuration files that are consulted.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
