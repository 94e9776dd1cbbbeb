//! DTO and request DTO models.

use serde::Serialize;

use super::php::{php_literal, php_string};
use super::{ClassRef, EmitContext};
use crate::domain::{
    ArtifactKind, ColumnDescriptor, EntityNames, EntitySchema, FieldRules, FormatHint,
    RelationDescriptor, RelationKind, SemanticType, ValidationRuleSet, example_value,
};

#[derive(Debug, Serialize)]
pub(super) struct DtoField {
    pub name: String,
    pub php_type: String,
    pub default: Option<String>,
    pub attribute_args: Vec<String>,
    pub from_array: String,
    pub from_model: String,
}

#[derive(Debug, Serialize)]
pub(super) struct DtoRelation {
    pub name: String,
    pub php_type: String,
    pub default: String,
    pub doc_type: Option<String>,
    pub related_dto: String,
    pub attribute_args: Vec<String>,
    pub from_array: String,
    pub from_model: String,
}

/// Slug recomputed from another column when it is missing.
#[derive(Debug, Serialize)]
pub(super) struct SlugBackfill {
    pub field: String,
    pub source: String,
}

#[derive(Debug, Serialize)]
pub(super) struct DtoModel {
    pub namespace: String,
    pub class: String,
    pub title: String,
    pub model: ClassRef,
    pub required: Vec<String>,
    pub fields: Vec<DtoField>,
    pub relations: Vec<DtoRelation>,
    pub slug: Option<SlugBackfill>,
}

#[derive(Debug, Serialize)]
pub(super) struct RequestDtoModel {
    pub namespace: String,
    pub class: String,
    pub title: String,
    pub required: Vec<String>,
    pub fields: Vec<DtoField>,
    pub rules: Vec<FieldRules>,
    pub slug: Option<SlugBackfill>,
}

pub(super) fn primary(
    ctx: &EmitContext<'_>,
    names: &EntityNames,
    schema: &EntitySchema,
) -> DtoModel {
    let class = ctx.class_ref(ArtifactKind::Dto);
    let slug = slug_backfill(schema);
    let columns: Vec<&ColumnDescriptor> = schema.columns.iter().collect();

    DtoModel {
        namespace: class.namespace,
        class: class.class,
        title: names.title.clone(),
        model: ctx.model_ref(names),
        required: required_fields(&columns),
        fields: columns
            .iter()
            .map(|column| field(column, names, slug.as_ref()))
            .collect(),
        relations: schema.relations.iter().map(relation).collect(),
        slug,
    }
}

pub(super) fn request(
    ctx: &EmitContext<'_>,
    names: &EntityNames,
    schema: &EntitySchema,
) -> RequestDtoModel {
    let class = ctx.class_ref(ArtifactKind::RequestDto);
    let slug = slug_backfill(schema);
    let columns: Vec<&ColumnDescriptor> = schema.request_columns().collect();
    let rules = ValidationRuleSet::for_schema(schema);

    RequestDtoModel {
        namespace: class.namespace,
        class: class.class,
        title: names.title.clone(),
        required: required_fields(&columns),
        fields: columns
            .iter()
            .map(|column| field(column, names, slug.as_ref()))
            .collect(),
        rules: rules.iter().cloned().collect(),
        slug,
    }
}

fn required_fields(columns: &[&ColumnDescriptor]) -> Vec<String> {
    columns
        .iter()
        .filter(|column| !column.nullable)
        .map(|column| php_string(&column.name))
        .collect()
}

fn slug_backfill(schema: &EntitySchema) -> Option<SlugBackfill> {
    schema.column("slug")?;
    ["name", "title"]
        .into_iter()
        .find(|source| schema.has_column(source))
        .map(|source| SlugBackfill {
            field: "slug".into(),
            source: source.into(),
        })
}

fn field(
    column: &ColumnDescriptor,
    names: &EntityNames,
    slug: Option<&SlugBackfill>,
) -> DtoField {
    let is_slug = slug.is_some_and(|s| s.field == column.name);
    let base_type = column.semantic_type.php_type();
    let php_type = if column.nullable {
        format!("?{base_type}")
    } else {
        base_type.to_string()
    };

    let default = match (&column.default_value, column.nullable) {
        (Some(value), _) if default_fits(column, value) => Some(php_literal(value)),
        (_, true) => Some("null".into()),
        _ => None,
    };

    DtoField {
        name: column.name.clone(),
        php_type,
        attribute_args: attribute_args(column, names),
        from_array: from_array(column, slug.filter(|_| is_slug)),
        from_model: from_model(column, is_slug),
        default,
    }
}

fn default_fits(column: &ColumnDescriptor, value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match (column.semantic_type, value) {
        (_, Value::Null) => column.nullable,
        (SemanticType::Int, Value::Number(n)) => n.is_i64() || n.is_u64(),
        (SemanticType::Float, Value::Number(_)) => true,
        (SemanticType::Bool, Value::Bool(_)) => true,
        (SemanticType::String, Value::String(_)) => true,
        (SemanticType::Array, Value::Array(_)) => true,
        _ => false,
    }
}

fn attribute_args(column: &ColumnDescriptor, names: &EntityNames) -> Vec<String> {
    let mut args = vec![
        format!("property: {}", php_string(&column.name)),
        format!("type: {}", php_string(column.semantic_type.openapi_type())),
    ];

    if let Some(hint) = column.format_hint {
        args.push(format!("format: {}", php_string(hint.as_str())));
    }
    if let Some(length) = column.max_length {
        args.push(format!("maxLength: {length}"));
    }
    if column.semantic_type == SemanticType::Array {
        args.push("items: new OA\\Items()".into());
    }
    if column.nullable {
        args.push("nullable: true".into());
    }
    args.push(format!(
        "example: {}",
        php_literal(&example_value(column, &names.title))
    ));

    args
}

fn from_array(column: &ColumnDescriptor, slug: Option<&SlugBackfill>) -> String {
    let key = php_string(&column.name);

    if let Some(slug) = slug {
        return format!(
            "!empty($data[{key}]) ? $data[{key}] : Str::slug((string) ($data[{}] ?? ''))",
            php_string(&slug.source)
        );
    }

    if column.nullable {
        return format!("$data[{key}] ?? null");
    }

    match &column.default_value {
        Some(value) if default_fits(column, value) => {
            format!("$data[{key}] ?? {}", php_literal(value))
        }
        _ if column.is_technical() => format!("(string) ($data[{key}] ?? '')"),
        _ => format!("$data[{key}]"),
    }
}

fn from_model(column: &ColumnDescriptor, is_slug: bool) -> String {
    if is_slug {
        return "$slug".into();
    }

    let access = format!("$model->{}", column.name);

    let date_format = match column.format_hint {
        Some(FormatHint::DateTime) => Some("\\DateTimeInterface::ATOM"),
        Some(FormatHint::Date) => Some("'Y-m-d'"),
        Some(FormatHint::Time) => Some("'H:i:s'"),
        _ => None,
    };

    if let Some(format) = date_format {
        let formatted = format!("static::formatDate({access}, {format})");
        return if column.nullable {
            formatted
        } else {
            format!("(string) {formatted}")
        };
    }

    match column.semantic_type {
        SemanticType::Array if !column.nullable => format!("{access} ?? []"),
        _ => access,
    }
}

fn relation(relation: &RelationDescriptor) -> DtoRelation {
    let related_dto = format!("{}Dto", relation.related);
    let accessor = php_string(&relation.accessor);
    let schema_ref = php_string(&format!("#/components/schemas/{related_dto}"));

    match relation.kind {
        RelationKind::ToMany => DtoRelation {
            name: relation.accessor.clone(),
            php_type: "array".into(),
            default: "[]".into(),
            doc_type: Some(format!("{related_dto}[]")),
            attribute_args: vec![
                format!("property: {accessor}"),
                "type: 'array'".into(),
                format!("items: new OA\\Items(ref: {schema_ref})"),
            ],
            from_array: format!(
                "array_map(fn (array $item) => {related_dto}::fromArray($item), $data[{accessor}] ?? [])"
            ),
            from_model: format!(
                "$model->relationLoaded({accessor}) ? $model->{}->map(fn ($related) => {related_dto}::fromModel($related))->all() : []",
                relation.accessor
            ),
            related_dto,
        },
        RelationKind::ToOne => DtoRelation {
            name: relation.accessor.clone(),
            php_type: format!("?{related_dto}"),
            default: "null".into(),
            doc_type: None,
            attribute_args: vec![
                format!("property: {accessor}"),
                format!("ref: {schema_ref}"),
                "nullable: true".into(),
            ],
            from_array: format!(
                "isset($data[{accessor}]) ? {related_dto}::fromArray($data[{accessor}]) : null"
            ),
            from_model: format!(
                "$model->relationLoaded({accessor}) && $model->{name} !== null ? {related_dto}::fromModel($model->{name}) : null",
                name = relation.accessor
            ),
            related_dto,
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{
        ColumnDefinition, EmitOptions, EntityDefinition, EntityName, PathLayout,
        RelationDefinition, introspect,
    };

    fn schema(def: EntityDefinition) -> (EntityNames, EntitySchema) {
        (EntityNames::new(&def.name), introspect(&def).unwrap())
    }

    fn post() -> EntityDefinition {
        EntityDefinition::new(EntityName::parse("Post").unwrap())
            .column(ColumnDefinition::new("title", "varchar(200)"))
            .column(ColumnDefinition::new("slug", "varchar(200)"))
            .column(ColumnDefinition::new("views", "int").with_default(json!(0)))
            .column(ColumnDefinition::new("published_at", "timestamp").nullable())
            .relation(RelationDefinition::new("comments", "hasMany", "Comment"))
            .relation(RelationDefinition::new("author", "belongsTo", "Author"))
    }

    fn with_ctx<T>(names: &EntityNames, schema: &EntitySchema, f: impl FnOnce(&EmitContext<'_>) -> T) -> T {
        let layout = PathLayout::default();
        let options = EmitOptions::default();
        let ctx = EmitContext {
            names: Some(names),
            schema: Some(schema),
            layout: &layout,
            options: &options,
        };
        f(&ctx)
    }

    #[test]
    fn slug_backfills_from_title() {
        let (names, schema) = schema(post());
        let model = with_ctx(&names, &schema, |ctx| primary(ctx, &names, &schema));

        let slug = model.slug.as_ref().unwrap();
        assert_eq!(slug.source, "title");
        let field = model.fields.iter().find(|f| f.name == "slug").unwrap();
        assert_eq!(field.from_model, "$slug");
        assert!(field.from_array.contains("Str::slug((string) ($data['title'] ?? ''))"));
    }

    #[test]
    fn no_backfill_without_slug_column() {
        let def = EntityDefinition::new(EntityName::parse("Tag").unwrap())
            .column(ColumnDefinition::new("name", "varchar(50)"));
        let (names, schema) = schema(def);
        let model = with_ctx(&names, &schema, |ctx| primary(ctx, &names, &schema));
        assert!(model.slug.is_none());
    }

    #[test]
    fn primary_dto_includes_technical_columns() {
        let (names, schema) = schema(post());
        let model = with_ctx(&names, &schema, |ctx| primary(ctx, &names, &schema));

        let fields: Vec<_> = model.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            fields,
            ["title", "slug", "views", "published_at", "id", "created_at", "updated_at"]
        );
        let id = model.fields.iter().find(|f| f.name == "id").unwrap();
        assert_eq!(id.php_type, "?int");
        assert_eq!(id.default.as_deref(), Some("null"));

        let created = model.fields.iter().find(|f| f.name == "created_at").unwrap();
        assert_eq!(
            created.from_model,
            "(string) static::formatDate($model->created_at, \\DateTimeInterface::ATOM)"
        );
    }

    #[test]
    fn request_dto_excludes_technical_columns_and_carries_rules() {
        let (names, schema) = schema(post());
        let model = with_ctx(&names, &schema, |ctx| request(ctx, &names, &schema));

        let fields: Vec<_> = model.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, ["title", "slug", "views", "published_at"]);
        let rule_fields: Vec<_> = model.rules.iter().map(|r| r.field.as_str()).collect();
        assert_eq!(rule_fields, fields);
        assert_eq!(model.required, ["'title'", "'slug'", "'views'"]);
    }

    #[test]
    fn defaults_and_annotations() {
        let (names, schema) = schema(post());
        let model = with_ctx(&names, &schema, |ctx| primary(ctx, &names, &schema));

        let views = model.fields.iter().find(|f| f.name == "views").unwrap();
        assert_eq!(views.default.as_deref(), Some("0"));
        assert_eq!(views.from_array, "$data['views'] ?? 0");

        let title = model.fields.iter().find(|f| f.name == "title").unwrap();
        assert!(title.attribute_args.contains(&"maxLength: 200".to_string()));
        assert!(title.attribute_args.contains(&"example: 'Sample Post'".to_string()));
    }

    #[test]
    fn relations_map_by_cardinality() {
        let (names, schema) = schema(post());
        let model = with_ctx(&names, &schema, |ctx| primary(ctx, &names, &schema));

        let comments = &model.relations[0];
        assert_eq!(comments.php_type, "array");
        assert_eq!(comments.doc_type.as_deref(), Some("CommentDto[]"));
        assert!(comments.from_model.contains("CommentDto::fromModel"));

        let author = &model.relations[1];
        assert_eq!(author.php_type, "?AuthorDto");
        assert!(author.from_model.starts_with("$model->relationLoaded('author')"));
    }
}
