//! Facet registry: the immutable set of telemetry facets collected per request.

use crate::error::{ConfigError, FacetError, ShapeError};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Raw payload returned by a facet query, before shaping.
pub type RawPayload = serde_json::Value;

/// Display-ready fields produced by a shaper.
pub type Shaped = serde_json::Value;

/// Outcome of one facet query.
pub type FacetResult = std::result::Result<RawPayload, FacetError>;

pub type QueryFuture = BoxFuture<'static, FacetResult>;

/// Capability that asynchronously fetches one facet's raw payload.
pub type QueryFn = Arc<dyn Fn() -> QueryFuture + Send + Sync>;

/// Pure conversion from raw payload to display fields.
pub type ShapeFn = fn(&RawPayload) -> std::result::Result<Shaped, ShapeError>;

/// One registered facet.
#[derive(Clone)]
pub struct FacetDescriptor {
    name: String,
    query: QueryFn,
    shape: ShapeFn,
    timeout: Option<Duration>,
}

impl FacetDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Per-facet timeout override, if one was configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn query(&self) -> QueryFn {
        Arc::clone(&self.query)
    }

    pub(crate) fn shape(&self, raw: &RawPayload) -> std::result::Result<Shaped, ShapeError> {
        (self.shape)(raw)
    }
}

impl fmt::Debug for FacetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacetDescriptor")
            .field("name", &self.name)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Ordered, name-unique collection of facet descriptors.
///
/// Built once at startup and shared read-only (behind an `Arc`) with every
/// request afterwards.
#[derive(Debug, Clone, Default)]
pub struct FacetRegistry {
    descriptors: Vec<FacetDescriptor>,
}

impl FacetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a facet. Fails on a blank or duplicate name.
    pub fn register<F, Fut>(
        &mut self,
        name: impl Into<String>,
        query: F,
        shape: ShapeFn,
    ) -> std::result::Result<(), ConfigError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FacetResult> + Send + 'static,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::BlankFacetName);
        }
        if self.get(&name).is_some() {
            return Err(ConfigError::DuplicateFacet(name));
        }
        let query: QueryFn = Arc::new(move || query().boxed());
        self.descriptors.push(FacetDescriptor {
            name,
            query,
            shape,
            timeout: None,
        });
        Ok(())
    }

    /// Adds a facet with its own timeout instead of the aggregator default.
    pub fn register_with_timeout<F, Fut>(
        &mut self,
        name: impl Into<String>,
        query: F,
        shape: ShapeFn,
        timeout: Duration,
    ) -> std::result::Result<(), ConfigError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FacetResult> + Send + 'static,
    {
        let name = name.into();
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                key: name,
                value: "0".into(),
            });
        }
        self.register(name.clone(), query, shape)?;
        self.set_timeout(&name, timeout)
    }

    /// Overrides the timeout of an already registered facet.
    pub fn set_timeout(
        &mut self,
        name: &str,
        timeout: Duration,
    ) -> std::result::Result<(), ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                key: name.to_string(),
                value: "0".into(),
            });
        }
        let descriptor = self
            .descriptors
            .iter_mut()
            .find(|d| d.name == name)
            .ok_or_else(|| ConfigError::UnknownFacet(name.to_string()))?;
        descriptor.timeout = Some(timeout);
        Ok(())
    }

    /// All descriptors in registration order.
    pub fn all(&self) -> &[FacetDescriptor] {
        &self.descriptors
    }

    pub fn get(&self, name: &str) -> Option<&FacetDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.name())
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
