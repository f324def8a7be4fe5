//! Aggregator: runs every facet query concurrently with per-facet timeouts and
//! turns each outcome into a report entry.

use crate::error::FacetError;
use crate::registry::{FacetDescriptor, FacetRegistry, FacetResult, QueryFn, Shaped};
use crate::report::Report;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, warn};

pub const DEFAULT_FACET_TIMEOUT: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct Aggregator {
    default_timeout: Duration,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_FACET_TIMEOUT)
    }
}

impl Aggregator {
    pub fn new(default_timeout: Duration) -> Self {
        Self { default_timeout }
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Effective timeout for a facet: its override, else the default.
    pub fn timeout_for(&self, descriptor: &FacetDescriptor) -> Duration {
        descriptor.timeout().unwrap_or(self.default_timeout)
    }

    /// Collects every registered facet. Never fails: per-facet problems become
    /// failure markers in the returned report.
    ///
    /// Dropping the returned future aborts the async part of every in-flight
    /// query. A blocking read that already started runs to completion and
    /// then releases its facet for the next request.
    pub async fn collect(&self, registry: &FacetRegistry) -> Report {
        self.run(registry.all()).await
    }

    /// Collects a single facet under the same timeout and isolation rules.
    pub async fn collect_one(&self, descriptor: &FacetDescriptor) -> Report {
        self.run(std::slice::from_ref(descriptor)).await
    }

    async fn run(&self, descriptors: &[FacetDescriptor]) -> Report {
        let started = Instant::now();

        // JoinSet aborts its tasks on drop. Blocking reads started by those
        // tasks are not aborted; each facet allows at most one of them.
        let mut tasks = JoinSet::new();
        for (index, descriptor) in descriptors.iter().enumerate() {
            let query = descriptor.query();
            let timeout = self.timeout_for(descriptor);
            tasks.spawn(async move { (index, run_query(query, timeout).await) });
        }

        let mut results: Vec<Option<FacetResult>> = vec![None; descriptors.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => results[index] = Some(result),
                Err(err) => warn!(error = %err, "facet task did not complete"),
            }
        }

        let entries: Vec<(String, Result<Shaped, FacetError>)> = descriptors
            .iter()
            .zip(results)
            .map(|(descriptor, result)| {
                let result = result
                    .unwrap_or_else(|| Err(FacetError::Query("facet query panicked".into())));
                let shaped = shape(descriptor, result);
                if let Err(err) = &shaped {
                    warn!(facet = descriptor.name(), error = %err, "facet failed");
                }
                (descriptor.name().to_string(), shaped)
            })
            .collect();

        let report = Report::build(entries);
        debug!(
            facets = report.len(),
            failures = report.failures(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "facet collection finished"
        );
        report
    }
}

async fn run_query(query: QueryFn, timeout: Duration) -> FacetResult {
    match tokio::time::timeout(timeout, query()).await {
        Ok(result) => result,
        Err(_) => Err(FacetError::Timeout),
    }
}

fn shape(descriptor: &FacetDescriptor, result: FacetResult) -> Result<Shaped, FacetError> {
    let raw = result?;
    Ok(descriptor.shape(&raw)?)
}
