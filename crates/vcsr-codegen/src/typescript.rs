//! Minimal TypeScript interface extraction.
//!
//! Only flat `interface Name { member?: Type; ... }` declarations are
//! understood. Member types map to JSON Schema as follows:
//!
//! | TypeScript | JSON Schema |
//! |------------|-------------|
//! | `string` | `{"type": "string"}` |
//! | `number` | `{"type": "number"}` |
//! | `boolean` | `{"type": "boolean"}` |
//! | `T[]`, `Array<T>` | `{"type": "array", "items": <T>}` |
//! | anything else | `{}` |

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};

static INTERFACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"interface\s+(\w+)(?:\s+extends\s+[\w\s,<>]+)?\s*\{([^}]*)\}")
        .unwrap_or_else(|e| panic!("interface pattern is invalid: {e}"))
});

static MEMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*(?:readonly\s+)?['"]?([\w@$-]+)['"]?\s*(\?)?\s*:\s*([^;,]+?)\s*[;,]?\s*$"#)
        .unwrap_or_else(|e| panic!("member pattern is invalid: {e}"))
});

/// Bodies of every `interface` declaration, in source order.
pub fn extract_interfaces(source: &str) -> Vec<(String, String)> {
    INTERFACE
        .captures_iter(source)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect()
}

fn member_schema(ts_type: &str) -> Value {
    let ts_type = ts_type.trim();
    if let Some(inner) = ts_type.strip_suffix("[]") {
        return json!({"type": "array", "items": member_schema(inner)});
    }
    if let Some(inner) = ts_type
        .strip_prefix("Array<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        return json!({"type": "array", "items": member_schema(inner)});
    }
    match ts_type {
        "string" => json!({"type": "string"}),
        "number" => json!({"type": "number"}),
        "boolean" => json!({"type": "boolean"}),
        _ => json!({}),
    }
}

/// Convert the first interface in `source` into a JSON Schema titled
/// `type_name`. `None` when the source declares no interface.
pub fn interface_to_schema(source: &str, type_name: &str) -> Option<Value> {
    let (_, body) = extract_interfaces(source).into_iter().next()?;

    let mut properties = Map::new();
    let mut required = Vec::new();
    for line in body.split(['\n', ';']) {
        let line = line.split("//").next().unwrap_or_default();
        let Some(caps) = MEMBER.captures(line) else {
            continue;
        };
        let name = caps[1].to_string();
        if caps.get(2).is_none() {
            required.push(Value::String(name.clone()));
        }
        properties.insert(name, member_schema(&caps[3]));
    }

    Some(json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": type_name,
        "type": "object",
        "properties": properties,
        "required": required,
    }))
}
