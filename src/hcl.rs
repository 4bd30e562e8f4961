//! Minimal HCL writer for Terraform resource blocks.
//!
//! Objects with identifier keys become nested blocks, lists of such objects
//! become repeated blocks, everything else is written as an attribute.

use serde_json::{Map, Value};

use crate::error::{DatadogError, Result};
use crate::resource::ResourceWrapper;
use crate::terraform;

const INDENT: &str = "  ";

/// Render `resource "<type>" "<name>" { ... }` for the wrapped resource.
pub fn encode(wrapper: &ResourceWrapper) -> Result<String> {
    let resource = &wrapper.resource;
    if resource.name.trim().is_empty() {
        return Err(DatadogError::Encode(
            "resource name must not be empty".to_string(),
        ));
    }
    if !is_identifier(&resource.name) {
        return Err(DatadogError::Encode(format!(
            "'{}' is not a valid resource name",
            resource.name
        )));
    }

    let body = terraform::attributes(&resource.payload)?;

    let mut encoder = Encoder::default();
    encoder.open_block(
        &format!(
            "resource {} {}",
            quote(resource.resource_type()),
            quote(&resource.name)
        ),
        0,
    );
    encoder.write_body(&body, 1)?;
    encoder.close_block(0);

    Ok(encoder.out)
}

#[derive(Default)]
struct Encoder {
    out: String,
}

impl Encoder {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open_block(&mut self, header: &str, depth: usize) {
        self.line(depth, &format!("{} {{", header));
    }

    fn close_block(&mut self, depth: usize) {
        self.line(depth, "}");
    }

    fn write_body(&mut self, body: &Map<String, Value>, depth: usize) -> Result<()> {
        let mut entries: Vec<_> = body.iter().filter(|(_, value)| !value.is_null()).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        let (blocks, attributes): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(|(_, value)| is_block(value));

        for (key, value) in attributes {
            check_identifier(key)?;
            self.line(depth, &format!("{} = {}", key, expression(value)));
        }

        for (key, value) in blocks {
            check_identifier(key)?;
            match value {
                Value::Object(inner) => self.write_block(key, inner, depth)?,
                Value::Array(items) => {
                    for item in items {
                        if let Value::Object(inner) = item {
                            self.write_block(key, inner, depth)?;
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn write_block(&mut self, key: &str, body: &Map<String, Value>, depth: usize) -> Result<()> {
        self.open_block(key, depth);
        self.write_body(body, depth + 1)?;
        self.close_block(depth);
        Ok(())
    }
}

fn is_block(value: &Value) -> bool {
    match value {
        Value::Object(map) => has_identifier_keys(map),
        Value::Array(items) => {
            !items.is_empty()
                && items
                    .iter()
                    .all(|item| matches!(item, Value::Object(map) if has_identifier_keys(map)))
        }
        _ => false,
    }
}

fn has_identifier_keys(map: &Map<String, Value>) -> bool {
    map.keys().all(|key| is_identifier(key))
}

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn check_identifier(key: &str) -> Result<()> {
    if is_identifier(key) {
        Ok(())
    } else {
        Err(DatadogError::Encode(format!(
            "'{}' is not a valid attribute name",
            key
        )))
    }
}

/// Single-line HCL expression for a JSON value.
fn expression(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(expression).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            let entries: Vec<String> = sorted
                .into_iter()
                .map(|(key, value)| {
                    let key = if is_identifier(key) {
                        key.clone()
                    } else {
                        quote(key)
                    };
                    format!("{} = {}", key, expression(value))
                })
                .collect();
            format!("{{ {} }}", entries.join(", "))
        }
    }
}

/// Quoted HCL string literal with template sequences escaped.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');

    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            c => out.push(c),
        }
    }

    out.push('"');
    out
}
