use std::path::PathBuf;

use crate::error::{DatadogError, Result};

pub const DEFAULT_SITE: &str = "datadoghq.com";
pub const DEFAULT_MONITOR_QUERY: &str = "team:container-app";

/// Everything an export run needs besides the resource it targets.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub app_key: String,
    pub site: String,
    pub monitor_query: String,
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    ///
    /// `DD_API_KEY` and `DD_APP_KEY` are required and must be non-empty.
    /// `DD_SITE` and `DD_MONITOR_QUERY` fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).filter(|v| !v.is_empty()).ok_or_else(|| {
                DatadogError::Config(format!(
                    "{} environment variable is required but was not set",
                    key
                ))
            })
        };

        let api_key = required("DD_API_KEY")?;
        let app_key = required("DD_APP_KEY")?;

        let site = lookup("DD_SITE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SITE.to_string());
        let monitor_query = lookup("DD_MONITOR_QUERY")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_MONITOR_QUERY.to_string());

        Ok(Self {
            api_key,
            app_key,
            site,
            monitor_query,
            output_dir: PathBuf::from("."),
        })
    }

    pub fn base_url(&self) -> String {
        format!("https://api.{}", self.site)
    }
}
