//! PHP literal helpers.

use serde_json::Value;

/// Single-quoted PHP string literal.
pub fn php_string(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// PHP source for a JSON value.
pub fn php_literal(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => php_string(s),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(php_literal).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{} => {}", php_string(k), php_literal(v)))
                .collect();
            format!("[{}]", inner.join(", "))
        }
    }
}
