//! The built-in facet table: what is collected, in which order, under which name.

use crate::error::{ConfigError, FacetError, ProbeError};
use crate::probe::HostProbe;
use crate::registry::{FacetRegistry, FacetResult};
use crate::shape;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Semaphore;

pub const CHASSIS: &str = "Chassis";
pub const TIME: &str = "Time";
pub const SYSTEM: &str = "System";
pub const CPU: &str = "CPU";
pub const BASEBOARD: &str = "Baseboard";
pub const BIOS: &str = "BIOS";
pub const MEMORY: &str = "Memory";
pub const BATTERY: &str = "Battery";
pub const OPERATING_SYSTEM: &str = "Operating System";
pub const DISK_DRIVES: &str = "Disk Drives";
pub const IP_ADDRESS: &str = "IP Address";
pub const GRAPHICS_CONTROLLERS: &str = "Graphics Controllers";
pub const DISPLAYS: &str = "Displays";

/// Report keys in the order they are registered.
pub const FACET_NAMES: [&str; 13] = [
    CHASSIS,
    TIME,
    SYSTEM,
    CPU,
    BASEBOARD,
    BIOS,
    MEMORY,
    BATTERY,
    OPERATING_SYSTEM,
    DISK_DRIVES,
    IP_ADDRESS,
    GRAPHICS_CONTROLLERS,
    DISPLAYS,
];

/// Registers every built-in facet against `probe`.
pub fn default_registry(probe: Arc<dyn HostProbe>) -> Result<FacetRegistry, ConfigError> {
    let mut registry = FacetRegistry::new();
    registry.register(CHASSIS, blocking(&probe, |p| p.chassis()), shape::shape_chassis)?;
    registry.register(TIME, blocking(&probe, |p| p.time()), shape::shape_time)?;
    registry.register(SYSTEM, blocking(&probe, |p| p.system()), shape::shape_system)?;
    registry.register(CPU, blocking(&probe, |p| p.cpu()), shape::shape_cpu)?;
    registry.register(BASEBOARD, blocking(&probe, |p| p.baseboard()), shape::shape_baseboard)?;
    registry.register(BIOS, blocking(&probe, |p| p.bios()), shape::shape_bios)?;
    registry.register(MEMORY, blocking(&probe, |p| p.memory()), shape::shape_memory)?;
    registry.register(BATTERY, blocking(&probe, |p| p.battery()), shape::shape_battery)?;
    registry.register(OPERATING_SYSTEM, blocking(&probe, |p| p.os()), shape::shape_os)?;
    registry.register(DISK_DRIVES, blocking(&probe, |p| p.disks()), shape::shape_disks)?;
    registry.register(IP_ADDRESS, blocking(&probe, |p| p.network()), shape::shape_network)?;
    registry.register(
        GRAPHICS_CONTROLLERS,
        blocking(&probe, |p| p.graphics_controllers()),
        shape::shape_graphics_controllers,
    )?;
    registry.register(DISPLAYS, blocking(&probe, |p| p.displays()), shape::shape_displays)?;
    Ok(registry)
}

/// Wraps a blocking probe read as a facet query: the read runs on the blocking
/// pool and its typed result is serialized into the raw payload.
///
/// A blocking read cannot be aborted once it started. Each facet therefore
/// holds a single permit that the read keeps until it returns, so a hung read
/// makes later queries of that facet wait (and time out) instead of piling up
/// more blocking threads.
fn blocking<T>(
    probe: &Arc<dyn HostProbe>,
    read: fn(&dyn HostProbe) -> Result<T, ProbeError>,
) -> impl Fn() -> BoxFuture<'static, FacetResult> + Send + Sync + 'static
where
    T: Serialize + Send + 'static,
{
    let probe = Arc::clone(probe);
    let in_flight = Arc::new(Semaphore::new(1));
    move || {
        let probe = Arc::clone(&probe);
        let in_flight = Arc::clone(&in_flight);
        async move {
            let permit = in_flight
                .acquire_owned()
                .await
                .map_err(|err| FacetError::Query(err.to_string()))?;
            let value = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                read(probe.as_ref())
            })
            .await
            .map_err(|err| FacetError::Query(format!("probe task failed: {err}")))??;
            serde_json::to_value(value).map_err(|err| FacetError::Query(err.to_string()))
        }
        .boxed()
    }
}
