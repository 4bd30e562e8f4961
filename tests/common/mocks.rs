// Mock Datadog API for export tests
// Wraps a wiremock server and builds exporters pointed at it

use dd2hcl::{Config, DatadogClient, Exporter};
use serde_json::Value;
use std::path::Path;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-api-key";
pub const APP_KEY: &str = "test-app-key";
pub const MONITOR_QUERY: &str = "team:container-app";

pub struct MockDatadog {
    pub server: MockServer,
}

impl MockDatadog {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Exporter with credentials and base URL pointing at this mock
    pub fn exporter(&self, output_dir: &Path) -> Exporter {
        let config = Config {
            api_key: API_KEY.to_string(),
            app_key: APP_KEY.to_string(),
            site: "localhost".to_string(),
            monitor_query: MONITOR_QUERY.to_string(),
            output_dir: output_dir.to_path_buf(),
        };
        let client = DatadogClient::with_base_url(
            config.api_key.clone(),
            config.app_key.clone(),
            self.server.uri(),
        )
        .expect("Failed to build client");

        Exporter::with_client(client, config)
    }

    /// Serve `body` for GET /api/v1/{resource}/{id}, expecting `times` calls
    pub async fn mount_resource(&self, resource: &str, id: &str, body: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/{}/{}", resource, id)))
            .and(header("DD-API-KEY", API_KEY))
            .and(header("DD-APPLICATION-KEY", APP_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Serve a raw error response for GET /api/v1/{resource}/{id}
    pub async fn mount_error(&self, resource: &str, id: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/{}/{}", resource, id)))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Serve the monitor search listing for the default query
    pub async fn mount_search(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path("/api/v1/monitor/search"))
            .and(query_param("query", MONITOR_QUERY))
            .and(query_param("page", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Full monitor body for a search entry
    pub fn monitor_body(id: i64, name: &str) -> Value {
        let mut monitor = super::fixtures::load_fixture("monitor");
        monitor["id"] = Value::from(id);
        monitor["name"] = Value::from(name);
        monitor
    }
}
