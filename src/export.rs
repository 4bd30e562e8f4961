use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::datadog::DatadogClient;
use crate::error::{DatadogError, Result};
use crate::hcl;
use crate::naming::{self, Sanitizer};
use crate::resource::{self, ResourceId, ResourceKind, ResourceWrapper};

/// Drives single and enumerate exports against one Datadog account.
pub struct Exporter {
    client: DatadogClient,
    config: Config,
    sanitizer: Sanitizer,
}

impl Exporter {
    pub fn new(config: Config) -> Result<Self> {
        let client = DatadogClient::from_config(&config)?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: DatadogClient, config: Config) -> Self {
        Self {
            client,
            config,
            sanitizer: Sanitizer::default(),
        }
    }

    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Single mode prints HCL to `out`; enumerate mode writes one file per
    /// monitor and reports each on `out`. Returns the files written.
    pub async fn run<W: Write>(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
        out: &mut W,
    ) -> Result<Vec<PathBuf>> {
        match id {
            ResourceId::Id(id) => {
                self.export_single(kind, id, out).await?;
                Ok(Vec::new())
            }
            ResourceId::Query => self.export_all(kind, out).await,
        }
    }

    /// Fetch, decode and encode one resource under the given Terraform name.
    pub async fn export_resource(&self, kind: ResourceKind, id: &str, name: &str) -> Result<String> {
        let body = self.client.fetch(kind, id).await?;
        let resource = resource::map(kind, &body, name)?;
        hcl::encode(&ResourceWrapper { resource })
    }

    pub async fn export_single<W: Write>(
        &self,
        kind: ResourceKind,
        id: &str,
        out: &mut W,
    ) -> Result<()> {
        if kind == ResourceKind::Monitor && id.parse::<i64>().is_err() {
            return Err(DatadogError::Usage(format!(
                "monitor id must be numeric or 'query', got '{}'",
                id
            )));
        }

        let hcl = self
            .export_resource(kind, id, &single_resource_name(kind, id))
            .await?;

        out.write_all(hcl.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|source| DatadogError::Write {
                path: PathBuf::from("<stdout>"),
                source,
            })
    }

    pub async fn export_all<W: Write>(&self, kind: ResourceKind, out: &mut W) -> Result<Vec<PathBuf>> {
        if kind != ResourceKind::Monitor {
            return Err(DatadogError::Usage(format!(
                "'query' is only supported for monitors, not {}",
                kind
            )));
        }

        let summaries = self
            .client
            .search_all_monitors(&self.config.monitor_query)
            .await?;
        log::info!(
            "found {} monitors matching '{}'",
            summaries.len(),
            self.config.monitor_query
        );

        let mut reserved = Reserved::default();
        let mut written = Vec::with_capacity(summaries.len());

        for summary in summaries {
            let (file_name, identifier) = reserved
                .reserve(self.sanitizer.sanitize(&summary.name), summary.id)
                .map_err(|e| e.in_resource(kind, summary.id))?;

            let hcl = self
                .export_resource(kind, &summary.id.to_string(), &identifier)
                .await
                .map_err(|e| e.in_resource(kind, summary.id))?;

            let path = self.config.output_dir.join(&file_name);
            write_file(&path, &hcl)?;
            log::info!("monitor {} '{}' -> {}", summary.id, summary.name, path.display());

            writeln!(out, "wrote file {}", path.display()).map_err(|source| {
                DatadogError::Write {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            written.push(path);
        }

        Ok(written)
    }
}

/// Resource name used in single mode; ids that are not valid identifiers
/// (numeric monitor ids) get the resource kind as prefix.
fn single_resource_name(kind: ResourceKind, id: &str) -> String {
    if hcl::is_identifier(id) {
        id.to_string()
    } else {
        format!("{}_{}", kind, id)
    }
}

/// File names and resource identifiers already used by this run. Every
/// exported file shares one directory, so both must be unique.
#[derive(Default)]
struct Reserved {
    files: HashSet<String>,
    identifiers: HashSet<String>,
}

impl Reserved {
    /// Reserve `file_name` and its identifier, falling back to
    /// `<stem>-<id>.tf` when an earlier monitor already holds either.
    fn reserve(&mut self, file_name: String, id: i64) -> Result<(String, String)> {
        if let Some(names) = self.try_reserve(&file_name) {
            return Ok(names);
        }

        let fallback = format!("{}-{}{}", naming::stem(&file_name), id, naming::FILE_EXTENSION);
        match self.try_reserve(&fallback) {
            Some(names) => {
                log::warn!("{} already taken, using {}", file_name, fallback);
                Ok(names)
            }
            None => Err(DatadogError::Encode(format!(
                "file name {} is already taken",
                fallback
            ))),
        }
    }

    fn try_reserve(&mut self, file_name: &str) -> Option<(String, String)> {
        let identifier = naming::derive_identifier(file_name);
        if self.files.contains(file_name) || self.identifiers.contains(&identifier) {
            return None;
        }

        self.files.insert(file_name.to_string());
        self.identifiers.insert(identifier.clone());
        Some((file_name.to_string(), identifier))
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| DatadogError::Write {
        path: path.to_path_buf(),
        source,
    })
}
