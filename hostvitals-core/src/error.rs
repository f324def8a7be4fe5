use std::path::PathBuf;
use thiserror::Error;

/// Startup-time configuration failures. These are the only fatal errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("duplicate facet name: {0}")]
    DuplicateFacet(String),
    #[error("facet name must not be empty")]
    BlankFacetName,
    #[error("unknown facet: {0}")]
    UnknownFacet(String),
    #[error("invalid timeout for {key}: {value}")]
    InvalidTimeout { key: String, value: String },
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Why a single facet could not be reported. Rendered into the failure marker.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FacetError {
    #[error("{0}")]
    Query(String),
    #[error("Timeout")]
    Timeout,
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),
}

/// Raw payload did not match what the facet's shaper expects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ShapeError(String);

impl ShapeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<serde_json::Error> for ShapeError {
    fn from(err: serde_json::Error) -> Self {
        Self(err.to_string())
    }
}

/// Failures raised by the OS-inspection layer.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{0} is not available on this host")]
    Unavailable(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ProbeError> for FacetError {
    fn from(err: ProbeError) -> Self {
        FacetError::Query(err.to_string())
    }
}
