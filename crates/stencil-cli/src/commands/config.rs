//! `stencil config`: inspect the effective configuration.

use serde_json::Value;

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                return output.json(config);
            }
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            let project = AppConfig::project_config_path(std::path::Path::new("."));
            output.print(&describe_path("project", &project))?;
            if let Some(global_path) = AppConfig::global_config_path() {
                output.print(&describe_path("global", &global_path))?;
            }
            if let Some(explicit) = &global.config {
                output.print(&describe_path("--config", explicit))?;
            }
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match config.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(Value::Null) => Ok(String::new()),
        Some(Value::Object(_)) | None => Err(CliError::UnknownConfigKey { key: key.into() }),
        Some(other) => Ok(other.to_string()),
    }
}

fn describe_path(label: &str, path: &std::path::Path) -> String {
    let state = if path.exists() { "found" } else { "not found" };
    format!("{label:<9} {} ({state})", path.display())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "paths.dto").unwrap(), "app/DTO");
        assert_eq!(get_config_value(&cfg, "pagination.per_page").unwrap(), "15");
        assert_eq!(get_config_value(&cfg, "output.no_color").unwrap(), "false");
    }

    #[test]
    fn unset_optional_key_is_empty() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "templates.local_path").unwrap(), "");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::UnknownConfigKey { .. })
        ));
        assert!(matches!(
            get_config_value(&cfg, "paths"),
            Err(CliError::UnknownConfigKey { .. })
        ));
    }
}
