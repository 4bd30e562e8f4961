//! Reshapes decoded Datadog payloads into the argument layout of the
//! Terraform `datadog_monitor` and `datadog_dashboard` resources.
//!
//! Server-computed fields (ids, timestamps, authors, state) are not
//! arguments of those resources and are left out.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::datadog::models::{Board, Monitor, Widget};
use crate::error::Result;
use crate::resource::Payload;

/// JSON list keys that Terraform models as repeated singular blocks.
const BLOCK_RENAMES: &[(&str, &str)] = &[
    ("requests", "request"),
    ("queries", "query"),
    ("formulas", "formula"),
    ("markers", "marker"),
    ("events", "event"),
    ("custom_links", "custom_link"),
    ("template_variables", "template_variable"),
    ("template_variable_presets", "template_variable_preset"),
];

/// Monitor options the provider no longer accepts.
const DROPPED_MONITOR_OPTIONS: &[&str] = &["silenced"];

/// Dashboard keys that only exist on the read side of the API.
const DROPPED_BOARD_KEYS: &[&str] = &["author_name", "deleted_at"];

pub fn attributes(payload: &Payload) -> Result<Map<String, Value>> {
    match payload {
        Payload::Monitor(monitor) => monitor_attributes(monitor),
        Payload::Board(board) => board_attributes(board),
    }
}

fn monitor_attributes(monitor: &Monitor) -> Result<Map<String, Value>> {
    let mut attrs = Map::new();
    attrs.insert("name".to_string(), Value::from(monitor.name.as_str()));
    attrs.insert("type".to_string(), Value::from(monitor.monitor_type.as_str()));
    attrs.insert("query".to_string(), Value::from(monitor.query.as_str()));
    insert(&mut attrs, "message", &monitor.message)?;
    if !monitor.tags.is_empty() {
        insert(&mut attrs, "tags", &monitor.tags)?;
    }
    insert(&mut attrs, "priority", &monitor.priority)?;
    insert(&mut attrs, "restricted_roles", &monitor.restricted_roles)?;

    let Some(options) = &monitor.options else {
        return Ok(attrs);
    };

    insert(&mut attrs, "monitor_thresholds", &options.thresholds)?;
    insert(&mut attrs, "monitor_threshold_windows", &options.threshold_windows)?;
    insert(&mut attrs, "notify_no_data", &options.notify_no_data)?;
    insert(&mut attrs, "notify_audit", &options.notify_audit)?;
    insert(&mut attrs, "timeout_h", &options.timeout_h)?;

    for (key, value) in &options.extra {
        if DROPPED_MONITOR_OPTIONS.contains(&key.as_str()) {
            continue;
        }
        insert(&mut attrs, key, value)?;
    }

    Ok(attrs)
}

fn board_attributes(board: &Board) -> Result<Map<String, Value>> {
    let mut attrs = Map::new();
    attrs.insert("title".to_string(), Value::from(board.title.as_str()));
    attrs.insert("layout_type".to_string(), Value::from(board.layout_type.as_str()));
    insert(&mut attrs, "description", &board.description)?;
    insert(&mut attrs, "is_read_only", &board.is_read_only)?;
    insert(&mut attrs, "tags", &board.tags)?;

    if let Some(variables) = &board.template_variables {
        insert(&mut attrs, "template_variable", variables)?;
    }

    let widgets = board
        .widgets
        .iter()
        .map(widget_block)
        .collect::<Result<Vec<_>>>()?;
    if !widgets.is_empty() {
        attrs.insert("widget".to_string(), Value::Array(widgets));
    }

    for (key, value) in &board.extra {
        if DROPPED_BOARD_KEYS.contains(&key.as_str()) {
            continue;
        }
        insert(&mut attrs, key, value)?;
    }

    rename_blocks(&mut attrs);
    Ok(attrs)
}

/// `{type, ...}` becomes `{<type>_definition {...}, widget_layout {...}}`.
/// Group widgets recurse into their children.
fn widget_block(widget: &Widget) -> Result<Value> {
    let mut definition = match serde_json::to_value(&widget.definition)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    definition.remove("type");

    if let Some(Value::Array(children)) = definition.remove("widgets") {
        let children = children
            .into_iter()
            .map(|child| widget_block(&serde_json::from_value::<Widget>(child)?))
            .collect::<Result<Vec<_>>>()?;
        definition.insert("widget".to_string(), Value::Array(children));
    }

    strip_nulls(&mut definition);
    rename_blocks(&mut definition);

    let mut block = Map::new();
    block.insert(
        format!("{}_definition", widget.definition.widget_type),
        Value::Object(definition),
    );
    insert(&mut block, "widget_layout", &widget.layout)?;

    Ok(Value::Object(block))
}

/// Insert `value` under `key` unless it serializes to null.
fn insert<T: Serialize>(attrs: &mut Map<String, Value>, key: &str, value: &T) -> Result<()> {
    let mut value = serde_json::to_value(value)?;
    if let Value::Object(map) = &mut value {
        strip_nulls(map);
    }
    if !value.is_null() {
        attrs.insert(key.to_string(), value);
    }
    Ok(())
}

fn strip_nulls(map: &mut Map<String, Value>) {
    map.retain(|_, v| !v.is_null());
    for value in map.values_mut() {
        match value {
            Value::Object(inner) => strip_nulls(inner),
            Value::Array(items) => {
                for item in items {
                    if let Value::Object(inner) = item {
                        strip_nulls(inner);
                    }
                }
            }
            _ => {}
        }
    }
}

fn rename_blocks(map: &mut Map<String, Value>) {
    for (plural, singular) in BLOCK_RENAMES {
        if matches!(map.get(*plural), Some(Value::Array(_))) {
            if let Some(value) = map.remove(*plural) {
                map.insert(singular.to_string(), value);
            }
        }
    }

    for value in map.values_mut() {
        match value {
            Value::Object(inner) => rename_blocks(inner),
            Value::Array(items) => {
                for item in items {
                    if let Value::Object(inner) = item {
                        rename_blocks(inner);
                    }
                }
            }
            _ => {}
        }
    }
}
