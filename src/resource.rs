use std::fmt;
use std::str::FromStr;

use crate::datadog::models::{Board, Monitor};
use crate::error::{DatadogError, Result};

/// The Datadog resource types that can be exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Dashboard,
    Monitor,
}

impl ResourceKind {
    /// Path segment under `/api/v1/`.
    pub fn api_path(self) -> &'static str {
        match self {
            ResourceKind::Dashboard => "dashboard",
            ResourceKind::Monitor => "monitor",
        }
    }

    /// Terraform resource type for this kind.
    pub fn terraform_type(self) -> &'static str {
        match self {
            ResourceKind::Dashboard => "datadog_dashboard",
            ResourceKind::Monitor => "datadog_monitor",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_path())
    }
}

impl FromStr for ResourceKind {
    type Err = DatadogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dashboard" => Ok(ResourceKind::Dashboard),
            "monitor" => Ok(ResourceKind::Monitor),
            other => Err(DatadogError::UnsupportedResourceType(other.to_string())),
        }
    }
}

/// Second CLI argument: a concrete id, or `query` for enumerate mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceId {
    Query,
    Id(String),
}

impl FromStr for ResourceId {
    type Err = DatadogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Err(DatadogError::Usage("resource id must not be empty".to_string())),
            "query" => Ok(ResourceId::Query),
            id => Ok(ResourceId::Id(id.to_string())),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Query => f.write_str("query"),
            ResourceId::Id(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Payload {
    Board(Box<Board>),
    Monitor(Box<Monitor>),
}

/// A typed Datadog definition ready to be rendered as a Terraform resource.
#[derive(Debug, Clone)]
pub struct Resource {
    pub name: String,
    pub payload: Payload,
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self.payload {
            Payload::Board(_) => ResourceKind::Dashboard,
            Payload::Monitor(_) => ResourceKind::Monitor,
        }
    }

    pub fn resource_type(&self) -> &'static str {
        self.kind().terraform_type()
    }
}

/// Root object handed to the HCL encoder.
#[derive(Debug, Clone)]
pub struct ResourceWrapper {
    pub resource: Resource,
}

/// Decode a raw API payload into a named resource.
pub fn map(kind: ResourceKind, body: &[u8], name: &str) -> Result<Resource> {
    let payload = match kind {
        ResourceKind::Dashboard => Payload::Board(Box::new(serde_json::from_slice(body)?)),
        ResourceKind::Monitor => Payload::Monitor(Box::new(serde_json::from_slice(body)?)),
    };

    Ok(Resource {
        name: name.to_string(),
        payload,
    })
}
