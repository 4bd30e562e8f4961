use reqwest::{Client, Response};

use super::models::*;
use crate::config::Config;
use crate::error::{DatadogError, Result};
use crate::resource::ResourceKind;

/// Page size requested from the monitor search endpoint.
pub const SEARCH_PAGE_SIZE: u32 = 100;

pub struct DatadogClient {
    client: Client,
    api_key: String,
    app_key: String,
    base_url: String,
}

impl DatadogClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_base_url(
            config.api_key.clone(),
            config.app_key.clone(),
            config.base_url(),
        )
    }

    pub fn with_base_url(api_key: String, app_key: String, base_url: String) -> Result<Self> {
        let client = Client::builder().build().map_err(DatadogError::Network)?;

        Ok(Self {
            client,
            api_key,
            app_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request(&self, endpoint: &str, query: Option<Vec<(&str, String)>>) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, endpoint);
        log::debug!("GET {}", url);

        let mut request = self
            .client
            .get(&url)
            .header("DD-API-KEY", &self.api_key)
            .header("DD-APPLICATION-KEY", &self.app_key)
            .header("Content-Type", "application/json");

        if let Some(ref params) = query {
            for (key, value) in params {
                request = request.query(&[(key, value)]);
            }
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> Result<Vec<u8>> {
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            Ok(body.to_vec())
        } else {
            log::debug!("request failed with {}", status);
            Err(DatadogError::HttpStatus {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            })
        }
    }

    // ============= Resources API =============

    /// Fetch the raw JSON of a single dashboard or monitor.
    pub async fn fetch(&self, kind: ResourceKind, resource_id: &str) -> Result<Vec<u8>> {
        let endpoint = format!("/api/v1/{}/{}", kind.api_path(), resource_id);

        self.request(&endpoint, None).await
    }

    // ============= Monitors API =============

    pub async fn search_monitors(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<MonitorSearchResponse> {
        let params = vec![
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];

        let body = self.request("/api/v1/monitor/search", Some(params)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Walk every page of the monitor search listing, preserving response order.
    pub async fn search_all_monitors(&self, query: &str) -> Result<Vec<MonitorSummary>> {
        let mut monitors = Vec::new();
        let mut page = 0;

        loop {
            let response = self.search_monitors(query, page, SEARCH_PAGE_SIZE).await?;
            log::debug!(
                "monitor search page {} returned {} monitors",
                page,
                response.monitors.len()
            );

            if response.monitors.is_empty() {
                break;
            }
            monitors.extend(response.monitors);

            let page_count = response
                .metadata
                .and_then(|m| m.page_count)
                .unwrap_or(0);
            if i64::from(page) + 1 >= page_count {
                break;
            }
            page += 1;
        }

        Ok(monitors)
    }
}
