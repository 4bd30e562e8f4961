use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatadogError {
    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Config(String),

    #[error("unsupported resource type '{0}' (expected 'dashboard' or 'monitor')")]
    UnsupportedResourceType(String),

    #[error("unable to get resource")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    #[error("unable to parse JSON")]
    Decode(#[from] serde_json::Error),

    #[error("unable to encode hcl: {0}")]
    Encode(String),

    #[error("unable to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} {id}")]
    Resource {
        kind: String,
        id: String,
        #[source]
        source: Box<DatadogError>,
    },
}

impl DatadogError {
    /// Attach the resource that was being exported when this error happened.
    pub fn in_resource(self, kind: impl ToString, id: impl ToString) -> Self {
        DatadogError::Resource {
            kind: kind.to_string(),
            id: id.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any resource context.
    pub fn root(&self) -> &DatadogError {
        match self {
            DatadogError::Resource { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, DatadogError>;
