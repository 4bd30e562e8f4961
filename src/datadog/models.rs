use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============= Monitors Models =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monitor {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub monitor_type: String,
    pub query: String,
    pub message: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created: Option<String>,
    pub created_at: Option<i64>,
    pub modified: Option<String>,
    pub overall_state: Option<String>,
    pub overall_state_modified: Option<String>,
    pub priority: Option<i32>,
    pub options: Option<MonitorOptions>,
    pub creator: Option<Creator>,
    pub deleted: Option<String>,
    pub multi: Option<bool>,
    pub org_id: Option<i64>,
    pub restricted_roles: Option<Vec<String>>,
    pub matching_downtimes: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creator {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub handle: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorOptions {
    pub thresholds: Option<MonitorThresholds>,
    pub threshold_windows: Option<MonitorThresholdWindows>,
    pub notify_no_data: Option<bool>,
    pub notify_audit: Option<bool>,
    pub timeout_h: Option<i32>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorThresholds {
    pub critical: Option<f64>,
    pub critical_recovery: Option<f64>,
    pub warning: Option<f64>,
    pub warning_recovery: Option<f64>,
    pub ok: Option<f64>,
    pub unknown: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorThresholdWindows {
    pub recovery_window: Option<String>,
    pub trigger_window: Option<String>,
}

/// One entry of the monitor search listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorSearchResponse {
    #[serde(default)]
    pub monitors: Vec<MonitorSummary>,
    pub metadata: Option<SearchMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchMetadata {
    pub page: Option<i64>,
    pub page_count: Option<i64>,
    pub per_page: Option<i64>,
    pub total_count: Option<i64>,
}

// ============= Dashboards Models =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub author_info: Option<AuthorInfo>,
    pub author_handle: Option<String>,
    pub layout_type: String,
    pub url: Option<String>,
    pub is_read_only: Option<bool>,
    pub template_variables: Option<Vec<TemplateVariable>>,
    pub widgets: Vec<Widget>,
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub name: Option<String>,
    pub handle: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateVariable {
    pub name: String,
    #[serde(rename = "default")]
    pub default_value: Option<String>,
    pub defaults: Option<Vec<String>>,
    pub prefix: Option<String>,
    pub available_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Widget {
    pub id: Option<i64>,
    pub definition: WidgetDefinition,
    pub layout: Option<WidgetLayout>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetDefinition {
    #[serde(rename = "type")]
    pub widget_type: String,
    pub title: Option<String>,
    pub title_size: Option<String>,
    pub title_align: Option<String>,
    pub requests: Option<Vec<serde_json::Value>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetLayout {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub is_column_break: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_search_response_without_metadata() {
        let response: MonitorSearchResponse =
            serde_json::from_str(r#"{"monitors":[{"id":1,"name":"a","status":"OK"}]}"#).unwrap();
        assert_eq!(
            response.monitors,
            vec![MonitorSummary {
                id: 1,
                name: "a".to_string()
            }]
        );
        assert!(response.metadata.is_none());
    }

    #[test]
    fn test_monitor_options_keep_unknown_keys() {
        let options: MonitorOptions = serde_json::from_str(
            r#"{"thresholds":{"critical":90},"renotify_interval":60,"include_tags":true}"#,
        )
        .unwrap();
        assert_eq!(options.thresholds.unwrap().critical, Some(90.0));
        assert_eq!(options.extra["renotify_interval"], serde_json::json!(60));
        assert_eq!(options.extra["include_tags"], serde_json::json!(true));
    }

    #[test]
    fn test_widget_definition_keeps_type_specific_keys() {
        let widget: Widget = serde_json::from_str(
            r#"{"id":7,"definition":{"type":"note","content":"hi","background_color":"white"}}"#,
        )
        .unwrap();
        assert_eq!(widget.definition.widget_type, "note");
        assert_eq!(widget.definition.extra["content"], serde_json::json!("hi"));
        assert!(widget.layout.is_none());
    }
}
