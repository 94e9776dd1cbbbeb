use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// SemanticType
// ============================================================================

/// The language-level type a column maps to in emitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Int,
    Bool,
    Float,
    String,
    Array,
}

impl SemanticType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
        }
    }

    /// PHP scalar type used in typed properties.
    pub const fn php_type(self) -> &'static str {
        self.as_str()
    }

    /// OpenAPI `type` keyword.
    pub const fn openapi_type(self) -> &'static str {
        match self {
            Self::Int => "integer",
            Self::Bool => "boolean",
            Self::Float => "number",
            Self::String => "string",
            Self::Array => "array",
        }
    }

    /// Laravel validation rule naming this type.
    pub const fn rule_token(self) -> &'static str {
        match self {
            Self::Int => "integer",
            Self::Bool => "boolean",
            Self::Float => "numeric",
            Self::String => "string",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// FormatHint
// ============================================================================

/// Value format refining a [`SemanticType::String`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatHint {
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "date-time")]
    DateTime,
    #[serde(rename = "time")]
    Time,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "uri")]
    Uri,
    #[serde(rename = "uuid")]
    Uuid,
    #[serde(rename = "ipv4")]
    Ipv4,
}

impl FormatHint {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Time => "time",
            Self::Email => "email",
            Self::Uri => "uri",
            Self::Uuid => "uuid",
            Self::Ipv4 => "ipv4",
        }
    }

    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::DateTime | Self::Time)
    }
}

impl fmt::Display for FormatHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "date-time" => Ok(Self::DateTime),
            "time" => Ok(Self::Time),
            "email" => Ok(Self::Email),
            "uri" => Ok(Self::Uri),
            "uuid" => Ok(Self::Uuid),
            "ipv4" => Ok(Self::Ipv4),
            other => Err(format!("unknown format hint '{other}'")),
        }
    }
}

// ============================================================================
// RelationKind
// ============================================================================

/// Cardinality of a relation as seen from the owning entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    ToOne,
    ToMany,
}

impl RelationKind {
    /// Recognize an ORM relation method name.
    ///
    /// Matching ignores case and underscores, so `belongs_to`, `belongsTo`
    /// and `BelongsTo` are equivalent. Unknown kinds yield `None`.
    pub fn recognize(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "hasone" | "belongsto" | "morphone" | "morphto" | "hasonethrough" => {
                Some(Self::ToOne)
            }
            "hasmany" | "belongstomany" | "morphmany" | "morphtomany" | "morphedbymany"
            | "hasmanythrough" => Some(Self::ToMany),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToOne => "toOne",
            Self::ToMany => "toMany",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// OverwritePolicy
// ============================================================================

/// What to do when an artifact's target path already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverwritePolicy {
    PromptIfExists,
    ForceAlways,
    SkipIfExists,
}

impl OverwritePolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PromptIfExists => "prompt-if-exists",
            Self::ForceAlways => "force-always",
            Self::SkipIfExists => "skip-if-exists",
        }
    }
}

impl fmt::Display for OverwritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// WebRenderStyle
// ============================================================================

/// How a web controller renders its pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebRenderStyle {
    #[default]
    Inertia,
    Blade,
}

impl WebRenderStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inertia => "inertia",
            Self::Blade => "blade",
        }
    }
}

impl fmt::Display for WebRenderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebRenderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inertia" => Ok(Self::Inertia),
            "blade" => Ok(Self::Blade),
            other => Err(format!("unknown render style '{other}'")),
        }
    }
}

// ============================================================================
// HttpStatus
// ============================================================================

/// Status codes the generated controllers respond with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatus {
    Ok,
    Created,
    NotFound,
    UnprocessableEntity,
    InternalServerError,
}

impl HttpStatus {
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::NotFound => 404,
            Self::UnprocessableEntity => 422,
            Self::InternalServerError => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_kinds_ignore_case_and_underscores() {
        assert_eq!(RelationKind::recognize("hasMany"), Some(RelationKind::ToMany));
        assert_eq!(RelationKind::recognize("belongs_to"), Some(RelationKind::ToOne));
        assert_eq!(RelationKind::recognize("MorphedByMany"), Some(RelationKind::ToMany));
        assert_eq!(RelationKind::recognize("hasOneThrough"), Some(RelationKind::ToOne));
        assert_eq!(RelationKind::recognize("scope"), None);
    }

    #[test]
    fn format_hint_round_trips_through_str() {
        for hint in [
            FormatHint::Date,
            FormatHint::DateTime,
            FormatHint::Time,
            FormatHint::Email,
            FormatHint::Uri,
            FormatHint::Uuid,
            FormatHint::Ipv4,
        ] {
            assert_eq!(hint.as_str().parse::<FormatHint>(), Ok(hint));
        }
    }

    #[test]
    fn semantic_type_tokens() {
        assert_eq!(SemanticType::Float.rule_token(), "numeric");
        assert_eq!(SemanticType::Int.openapi_type(), "integer");
        assert_eq!(SemanticType::Bool.php_type(), "bool");
    }
}
