//! Native database type to semantic type and format mapping.
//!
//! Pure functions; the same inputs always produce the same outputs.

use serde_json::{Value, json};

use super::naming::slugify;
use super::schema::ColumnDescriptor;
use super::value_objects::{FormatHint, SemanticType};

/// A native column type split into its base name and optional length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeType {
    /// Lowercased base name with `unsigned` modifiers removed.
    pub base: String,
    /// Declared length, when exactly one numeric argument was given.
    pub length: Option<u32>,
}

impl NativeType {
    /// Parse `varchar(255)`, `decimal(8,2)`, `bigint unsigned`,
    /// `unsignedBigInteger` and similar spellings.
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.trim().to_ascii_lowercase();

        let (head, args) = match lowered.split_once('(') {
            Some((head, rest)) => (head, rest.split(')').next().unwrap_or_default()),
            None => (lowered.as_str(), ""),
        };

        let base: String = head
            .split_whitespace()
            .filter(|word| *word != "unsigned")
            .collect::<Vec<_>>()
            .join(" ");
        let base = base.strip_prefix("unsigned").unwrap_or(&base).trim().to_string();

        let parts: Vec<&str> = args
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        let length = match parts.as_slice() {
            [single] => single.parse().ok(),
            _ => None,
        };

        Self { base, length }
    }
}

const INT_TYPES: &[&str] = &[
    "int",
    "integer",
    "tinyint",
    "smallint",
    "mediumint",
    "bigint",
    "tinyinteger",
    "smallinteger",
    "mediuminteger",
    "biginteger",
    "increments",
    "bigincrements",
    "foreignid",
    "serial",
    "bigserial",
    "year",
];

const BOOL_TYPES: &[&str] = &["bool", "boolean"];

const FLOAT_TYPES: &[&str] = &[
    "decimal",
    "float",
    "double",
    "real",
    "numeric",
    "money",
    "double precision",
];

const ARRAY_TYPES: &[&str] = &["json", "jsonb"];

fn temporal_hint(base: &str) -> Option<FormatHint> {
    match base {
        "date" => Some(FormatHint::Date),
        "datetime" | "datetimetz" | "timestamp" | "timestamptz" => Some(FormatHint::DateTime),
        "time" | "timetz" => Some(FormatHint::Time),
        _ => None,
    }
}

fn type_implied_hint(base: &str) -> Option<FormatHint> {
    match base {
        "uuid" | "foreignuuid" => Some(FormatHint::Uuid),
        "inet" | "ipaddress" => Some(FormatHint::Ipv4),
        _ => None,
    }
}

/// Format hint implied by the column name.
///
/// Keywords are checked in order: `email`, `url`, `uuid`, `ip`. The first
/// three match anywhere in the name; `ip` must be a whole snake_case segment
/// so that `description` or `zip_code` do not become addresses.
fn keyword_hint(column: &str) -> Option<FormatHint> {
    let lowered = column.to_ascii_lowercase();

    if lowered.contains("email") {
        return Some(FormatHint::Email);
    }
    if lowered.contains("url") {
        return Some(FormatHint::Uri);
    }
    if lowered.contains("uuid") {
        return Some(FormatHint::Uuid);
    }
    if lowered.split('_').any(|segment| segment == "ip") {
        return Some(FormatHint::Ipv4);
    }
    None
}

/// Map a native database type and column name to a semantic type and an
/// optional format hint.
///
/// Temporal types always map to [`SemanticType::String`] with their temporal
/// hint. Name keywords only refine string columns. Unknown types map to
/// string.
pub fn map_type(native_type: &str, column_name: &str) -> (SemanticType, Option<FormatHint>) {
    let native = NativeType::parse(native_type);
    let base = native.base.as_str();

    if let Some(hint) = temporal_hint(base) {
        return (SemanticType::String, Some(hint));
    }

    let semantic = if INT_TYPES.contains(&base) {
        SemanticType::Int
    } else if BOOL_TYPES.contains(&base) {
        SemanticType::Bool
    } else if FLOAT_TYPES.contains(&base) {
        SemanticType::Float
    } else if ARRAY_TYPES.contains(&base) {
        SemanticType::Array
    } else {
        SemanticType::String
    };

    let hint = match semantic {
        SemanticType::String => type_implied_hint(base).or_else(|| keyword_hint(column_name)),
        _ => None,
    };

    (semantic, hint)
}

/// Deterministic example value used in API documentation annotations.
///
/// `entity_title` feeds the `name`, `title` and `slug` examples.
pub fn example_value(column: &ColumnDescriptor, entity_title: &str) -> Value {
    if let Some(hint) = column.format_hint {
        return match hint {
            FormatHint::Email => json!("user@example.com"),
            FormatHint::Uri => json!("https://example.com"),
            FormatHint::Uuid => json!("9b2f4c1e-7d3a-4e8b-a5c6-1f0e2d3c4b5a"),
            FormatHint::Ipv4 => json!("192.168.0.1"),
            FormatHint::Date => json!("2024-01-15"),
            FormatHint::DateTime => json!("2024-01-15T10:30:00Z"),
            FormatHint::Time => json!("10:30:00"),
        };
    }

    let sample_name = format!("Sample {entity_title}");
    let lowered = column.name.to_ascii_lowercase();

    match column.semantic_type {
        SemanticType::Int => json!(1),
        SemanticType::Bool => json!(true),
        SemanticType::Float => {
            if lowered.contains("price") || lowered.contains("amount") {
                json!(19.99)
            } else {
                json!(1.5)
            }
        }
        SemanticType::Array => json!([]),
        SemanticType::String => match lowered.as_str() {
            "name" | "title" => json!(sample_name),
            "slug" => json!(slugify(&sample_name)),
            "description" | "summary" | "body" | "content" => {
                json!(format!("A short description of the {}", entity_title.to_lowercase()))
            }
            "phone" | "phone_number" => json!("+1-555-0100"),
            "isbn" => json!("978-3-16-148410-0"),
            _ => json!("string"),
        },
    }
}
