//! Entity naming: validated class names and every derived spelling the
//! emitters need (plural, snake, camel, kebab, artifact class names).

use std::fmt;
use std::path::Path;

use convert_case::{Case, Casing};
use serde::Serialize;

use super::error::DomainError;

/// Validated, PascalCase entity (model) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityName(String);

impl EntityName {
    /// Parse a user-supplied model name.
    ///
    /// Accepts ASCII letters, digits and underscores, starting with a letter.
    /// The result is normalized to PascalCase (`blog_post` becomes `BlogPost`).
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidEntityName {
                name: raw.to_string(),
                reason: "name is empty".into(),
            });
        }

        if !trimmed.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidEntityName {
                name: raw.to_string(),
                reason: "must start with a letter".into(),
            });
        }

        if let Some(bad) = trimmed
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && *c != '_')
        {
            return Err(DomainError::InvalidEntityName {
                name: raw.to_string(),
                reason: format!("contains invalid character '{bad}'"),
            });
        }

        let pascal = if trimmed.contains('_') {
            trimmed.to_case(Case::Pascal)
        } else {
            let mut chars = trimmed.chars();
            chars
                .next()
                .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
                .unwrap_or_default()
        };

        Ok(Self(pascal))
    }

    /// Parse a DTO class name, dropping a trailing `Dto` suffix.
    ///
    /// `AuthorDto` resolves to `Author`; `Author` is accepted unchanged.
    pub fn from_dto_name(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        let base = trimmed
            .strip_suffix("Dto")
            .or_else(|| trimmed.strip_suffix("DTO"))
            .filter(|base| !base.is_empty())
            .unwrap_or(trimmed);
        Self::parse(base)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Every spelling of an entity name used across emitted artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityNames {
    pub class: String,
    pub plural_class: String,
    pub snake: String,
    pub snake_plural: String,
    pub camel: String,
    pub camel_plural: String,
    pub kebab_plural: String,
    pub title: String,
    pub title_plural: String,
    pub dto: String,
    pub request_dto: String,
    pub request: String,
    pub resource: String,
    pub repository: String,
    pub service: String,
    pub controller: String,
    pub cache_prefix: String,
}

impl EntityNames {
    pub fn new(entity: &EntityName) -> Self {
        let class = entity.as_str().to_string();
        let snake = class.to_case(Case::Snake);
        let snake_plural = pluralize(&snake);
        let plural_class = snake_plural.to_case(Case::Pascal);

        Self {
            camel: snake.to_case(Case::Camel),
            camel_plural: snake_plural.to_case(Case::Camel),
            kebab_plural: snake_plural.to_case(Case::Kebab),
            title: snake.to_case(Case::Title),
            title_plural: snake_plural.to_case(Case::Title),
            dto: format!("{class}Dto"),
            request_dto: format!("{class}RequestDto"),
            request: format!("{class}Request"),
            resource: format!("{class}Resource"),
            repository: format!("{class}Repository"),
            service: format!("{class}Service"),
            controller: format!("{class}Controller"),
            cache_prefix: format!("{snake}_"),
            class,
            plural_class,
            snake,
            snake_plural,
        }
    }
}

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("ox", "oxen"),
];

const UNCOUNTABLE: &[&str] = &[
    "data",
    "equipment",
    "feedback",
    "information",
    "media",
    "metadata",
    "news",
    "series",
    "sheep",
    "species",
];

/// English pluralization of a snake_case word. Only the last segment changes.
pub fn pluralize(snake: &str) -> String {
    let (head, last) = match snake.rfind('_') {
        Some(idx) => snake.split_at(idx + 1),
        None => ("", snake),
    };
    format!("{head}{}", pluralize_word(last))
}

fn pluralize_word(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if lower.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return (*plural).to_string();
    }

    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{word}es");
    }

    if let Some(stem) = word.strip_suffix('y') {
        let before_y = stem.chars().last();
        if before_y.is_some_and(|c| !"aeiou".contains(c.to_ascii_lowercase())) {
            return format!("{stem}ies");
        }
    }

    format!("{word}s")
}

/// URL slug: lowercase ASCII alphanumerics separated by single hyphens.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// PHP namespace for a project-relative directory (`app/Http/Requests`
/// becomes `App\Http\Requests`).
pub fn namespace_for(dir: &Path) -> String {
    dir.components()
        .filter_map(|component| match component {
            std::path::Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .map(|part| {
            if part == "app" {
                "App".to_string()
            } else {
                let mut chars = part.chars();
                chars
                    .next()
                    .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
                    .unwrap_or_default()
            }
        })
        .collect::<Vec<_>>()
        .join("\\")
}
