//! Validation rule synthesis for request payloads.

use std::fmt;

use serde::Serialize;

use super::schema::{ColumnDescriptor, EntitySchema};
use super::value_objects::{FormatHint, SemanticType};

/// Format accepted for `date-time` columns (ISO 8601 with offset).
pub const DATE_TIME_FORMAT: &str = "Y-m-d\\TH:i:sP";

/// One Laravel validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleToken {
    Required,
    Nullable,
    Type(SemanticType),
    Max(u32),
    Email,
    Url,
    Date,
    DateFormat(&'static str),
}

impl fmt::Display for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("required"),
            Self::Nullable => f.write_str("nullable"),
            Self::Type(semantic) => f.write_str(semantic.rule_token()),
            Self::Max(length) => write!(f, "max:{length}"),
            Self::Email => f.write_str("email"),
            Self::Url => f.write_str("url"),
            Self::Date => f.write_str("date"),
            Self::DateFormat(format) => write!(f, "date_format:{format}"),
        }
    }
}

impl Serialize for RuleToken {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered rules for a single column: presence, type, length, format.
pub fn rules_for(column: &ColumnDescriptor) -> Vec<RuleToken> {
    let mut rules = vec![if column.nullable {
        RuleToken::Nullable
    } else {
        RuleToken::Required
    }];

    rules.push(RuleToken::Type(column.semantic_type));

    if column.semantic_type == SemanticType::String {
        if let Some(length) = column.max_length {
            rules.push(RuleToken::Max(length));
        }

        match column.format_hint {
            Some(FormatHint::Email) => rules.push(RuleToken::Email),
            Some(FormatHint::Uri) => rules.push(RuleToken::Url),
            Some(FormatHint::Date) => rules.push(RuleToken::Date),
            Some(FormatHint::DateTime) => rules.push(RuleToken::DateFormat(DATE_TIME_FORMAT)),
            _ => {}
        }
    }

    rules
}

/// Rules for one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRules {
    pub field: String,
    pub rules: Vec<RuleToken>,
}

/// Field-to-rules map in declaration order, covering exactly the request
/// columns of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationRuleSet(Vec<FieldRules>);

impl ValidationRuleSet {
    pub fn for_schema(schema: &EntitySchema) -> Self {
        Self(
            schema
                .request_columns()
                .map(|column| FieldRules {
                    field: column.name.clone(),
                    rules: rules_for(column),
                })
                .collect(),
        )
    }

    pub fn get(&self, field: &str) -> Option<&[RuleToken]> {
        self.0
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.rules.as_slice())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|entry| entry.field.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldRules> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::naming::EntityName;
    use crate::domain::schema::{ColumnDefinition, EntityDefinition, introspect};

    fn tokens(rules: &[RuleToken]) -> Vec<String> {
        rules.iter().map(ToString::to_string).collect()
    }

    fn author_schema() -> EntitySchema {
        let def = EntityDefinition::new(EntityName::parse("Author").unwrap())
            .column(ColumnDefinition::new("name", "varchar(255)"))
            .column(ColumnDefinition::new("email", "varchar(255)").nullable())
            .column(ColumnDefinition::new("bio", "text").nullable());
        introspect(&def).unwrap()
    }

    #[test]
    fn author_rules_match_declaration() {
        let rules = ValidationRuleSet::for_schema(&author_schema());

        assert_eq!(tokens(rules.get("name").unwrap()), ["required", "string", "max:255"]);
        assert_eq!(
            tokens(rules.get("email").unwrap()),
            ["nullable", "string", "max:255", "email"]
        );
        assert_eq!(tokens(rules.get("bio").unwrap()), ["nullable", "string"]);
        assert_eq!(rules.fields().collect::<Vec<_>>(), ["name", "email", "bio"]);
        assert!(rules.get("id").is_none());
        assert!(rules.get("created_at").is_none());
    }

    #[test]
    fn temporal_and_scalar_rules() {
        let def = EntityDefinition::new(EntityName::parse("Event").unwrap())
            .column(ColumnDefinition::new("starts_at", "timestamp"))
            .column(ColumnDefinition::new("held_on", "date").nullable())
            .column(ColumnDefinition::new("website_url", "varchar(2048)"))
            .column(ColumnDefinition::new("capacity", "int"))
            .column(ColumnDefinition::new("fee", "decimal(8,2)"))
            .column(ColumnDefinition::new("public", "boolean"))
            .column(ColumnDefinition::new("tags", "json").nullable());
        let rules = ValidationRuleSet::for_schema(&introspect(&def).unwrap());

        assert_eq!(
            tokens(rules.get("starts_at").unwrap()),
            ["required", "string", "date_format:Y-m-d\\TH:i:sP"]
        );
        assert_eq!(tokens(rules.get("held_on").unwrap()), ["nullable", "string", "date"]);
        assert_eq!(
            tokens(rules.get("website_url").unwrap()),
            ["required", "string", "max:2048", "url"]
        );
        assert_eq!(tokens(rules.get("capacity").unwrap()), ["required", "integer"]);
        assert_eq!(tokens(rules.get("fee").unwrap()), ["required", "numeric"]);
        assert_eq!(tokens(rules.get("public").unwrap()), ["required", "boolean"]);
        assert_eq!(tokens(rules.get("tags").unwrap()), ["nullable", "array"]);
    }

    #[test]
    fn presence_token_always_comes_first() {
        let rules = ValidationRuleSet::for_schema(&author_schema());
        for entry in rules.iter() {
            let first = entry.rules[0];
            assert!(first == RuleToken::Required || first == RuleToken::Nullable);
        }
    }

    #[test]
    fn tokens_serialize_as_strings() {
        let json = serde_json::to_value(RuleToken::Max(80)).unwrap();
        assert_eq!(json, serde_json::json!("max:80"));
    }
}
