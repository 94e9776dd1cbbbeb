//! `stencil schema:list` and `stencil schema:show`.

use stencil_adapters::ManifestSchemaSource;
use stencil_core::application::EntityOverview;
use stencil_core::prelude::*;

use crate::{
    cli::{SchemaFormat, SchemaShowArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

fn service(config: &AppConfig) -> SchemaService {
    SchemaService::new(Box::new(ManifestSchemaSource::new(config.schema.dir.clone())))
}

/// Print every declared entity, one per line.
pub fn list(config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let entities = service(config).list()?;

    if output.is_json() {
        let names: Vec<&str> = entities.iter().map(EntityName::as_str).collect();
        return output.json(&names);
    }

    if entities.is_empty() {
        output.info(&format!(
            "No entities declared in {}",
            config.schema.dir.display()
        ))?;
        return Ok(());
    }

    for entity in &entities {
        output.print(entity.as_str())?;
    }
    Ok(())
}

/// Print the introspected schema and the validation rules of one entity.
pub fn show(args: SchemaShowArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let overview = service(config).describe(&args.model)?;

    if args.format == SchemaFormat::Json || output.is_json() {
        return output.json(&overview);
    }

    for line in render_table(&overview) {
        output.print(&line)?;
    }
    Ok(())
}

fn render_table(overview: &EntityOverview) -> Vec<String> {
    let schema = &overview.schema;
    let mut lines = vec![
        format!("{} (table: {})", schema.entity, schema.table),
        String::new(),
        format!(
            "  {:<20} {:<10} {:<18} {:<8} {}",
            "COLUMN", "TYPE", "NATIVE", "NULL", "FORMAT"
        ),
    ];

    for column in &schema.columns {
        let native = match column.max_length {
            Some(max) if !column.native_type.contains('(') => {
                format!("{}({max})", column.native_type)
            }
            _ => column.native_type.clone(),
        };
        lines.push(format!(
            "  {:<20} {:<10} {:<18} {:<8} {}",
            column.name,
            column.semantic_type.to_string(),
            native,
            if column.nullable { "yes" } else { "no" },
            column
                .format_hint
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".into()),
        ));
    }

    if !schema.relations.is_empty() {
        lines.push(String::new());
        lines.push("  RELATIONS".into());
        for relation in &schema.relations {
            lines.push(format!(
                "  {:<20} {:<10} {}",
                relation.accessor,
                relation.kind.to_string(),
                relation.related
            ));
        }
    }

    if !overview.rules.is_empty() {
        lines.push(String::new());
        lines.push("  RULES".into());
        for entry in overview.rules.iter() {
            let rules: Vec<String> = entry.rules.iter().map(ToString::to_string).collect();
            lines.push(format!("  {:<20} {}", entry.field, rules.join("|")));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::domain::{ColumnDefinition, EntityDefinition, ValidationRuleSet, introspect};

    fn overview() -> EntityOverview {
        let def = EntityDefinition::new(EntityName::parse("Author").unwrap())
            .column(ColumnDefinition::new("name", "varchar(255)"))
            .column(ColumnDefinition::new("email", "varchar(255)").nullable());
        let schema = introspect(&def).unwrap();
        let rules = ValidationRuleSet::for_schema(&schema);
        EntityOverview { schema, rules }
    }

    #[test]
    fn table_lists_columns_and_rules() {
        let lines = render_table(&overview());
        assert_eq!(lines[0], "Author (table: authors)");
        assert!(lines.iter().any(|l| l.contains("email") && l.contains("yes")));
        assert!(lines.iter().any(|l| l.contains("required|string|max:255")));
        assert!(lines.iter().any(|l| l.trim_start().starts_with("id ")));
    }

    #[test]
    fn table_omits_empty_relation_section() {
        let lines = render_table(&overview());
        assert!(!lines.iter().any(|l| l.contains("RELATIONS")));
    }
}
