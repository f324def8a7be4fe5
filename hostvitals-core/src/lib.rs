//! Core library for host telemetry: facet registry, concurrent aggregation
//! with per-facet timeouts, display shaping, and the host probes behind them.

mod aggregator;
mod config;
mod error;
pub mod facets;
mod models;
pub mod probe;
mod registry;
mod report;
pub mod shape;

pub use aggregator::{Aggregator, DEFAULT_FACET_TIMEOUT};
pub use config::{ServerConfig, DEFAULT_HOST, DEFAULT_PORT};
pub use error::{ConfigError, FacetError, ProbeError, ShapeError};
pub use facets::default_registry;
pub use models::{
    BaseboardInfo, BatteryInfo, BiosInfo, ChassisInfo, CpuInfo, DiskInfo, DisplayInfo,
    GraphicsController, MemoryInfo, NetworkInterface, OsInfo, SystemInfo, TimeInfo,
};
pub use probe::{HostProbe, SystemProbe};
pub use registry::{
    FacetDescriptor, FacetRegistry, FacetResult, QueryFn, QueryFuture, RawPayload, ShapeFn, Shaped,
};
pub use report::{failure_marker, FacetEntry, Report};
