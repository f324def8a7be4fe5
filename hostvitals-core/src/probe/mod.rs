//! Host probes: the blocking reads that produce raw facet payloads.
//!
//! `SystemProbe` answers CPU, memory, OS, time, disks and network through
//! `sysinfo`; everything `sysinfo` does not cover (firmware tables, batteries,
//! GPUs, monitors) is read from Linux sysfs below a configurable root so the
//! readers can be pointed at a fixture tree.

mod dmi;
mod drm;
mod edid;
mod host;
mod pci_ids;
mod power;
mod sysfs;

use crate::error::ProbeError;
use crate::models::{
    BaseboardInfo, BatteryInfo, BiosInfo, ChassisInfo, CpuInfo, DiskInfo, DisplayInfo,
    GraphicsController, MemoryInfo, NetworkInterface, OsInfo, SystemInfo, TimeInfo,
};
use std::path::{Path, PathBuf};

/// Source of raw facet data. Every method blocks.
pub trait HostProbe: Send + Sync {
    fn chassis(&self) -> Result<ChassisInfo, ProbeError>;
    fn time(&self) -> Result<TimeInfo, ProbeError>;
    fn system(&self) -> Result<SystemInfo, ProbeError>;
    fn cpu(&self) -> Result<CpuInfo, ProbeError>;
    fn baseboard(&self) -> Result<BaseboardInfo, ProbeError>;
    fn bios(&self) -> Result<BiosInfo, ProbeError>;
    fn memory(&self) -> Result<MemoryInfo, ProbeError>;
    fn battery(&self) -> Result<BatteryInfo, ProbeError>;
    fn os(&self) -> Result<OsInfo, ProbeError>;
    fn disks(&self) -> Result<Vec<DiskInfo>, ProbeError>;
    fn network(&self) -> Result<Vec<NetworkInterface>, ProbeError>;
    fn graphics_controllers(&self) -> Result<Vec<GraphicsController>, ProbeError>;
    fn displays(&self) -> Result<Vec<DisplayInfo>, ProbeError>;
}

/// The probe for the machine this process runs on.
#[derive(Debug, Clone)]
pub struct SystemProbe {
    root: PathBuf,
    tz: Option<String>,
}

impl SystemProbe {
    /// Probes `/`, naming the time zone after this process's `TZ` when set.
    pub fn new() -> Self {
        Self {
            tz: std::env::var("TZ").ok(),
            ..Self::with_root("/")
        }
    }

    /// Read sysfs, procfs and `/etc` below `root` instead of `/`. The process
    /// environment is ignored.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            tz: None,
        }
    }

    /// Overrides the `TZ` value the Time facet reports.
    pub fn with_timezone(mut self, tz: impl Into<String>) -> Self {
        self.tz = Some(tz.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl HostProbe for SystemProbe {
    fn chassis(&self) -> Result<ChassisInfo, ProbeError> {
        dmi::chassis(&self.root)
    }

    fn time(&self) -> Result<TimeInfo, ProbeError> {
        host::time(&self.root, self.tz.as_deref())
    }

    fn system(&self) -> Result<SystemInfo, ProbeError> {
        dmi::system(&self.root, host::hostname())
    }

    fn cpu(&self) -> Result<CpuInfo, ProbeError> {
        host::cpu(&self.root)
    }

    fn baseboard(&self) -> Result<BaseboardInfo, ProbeError> {
        dmi::baseboard(&self.root)
    }

    fn bios(&self) -> Result<BiosInfo, ProbeError> {
        dmi::bios(&self.root)
    }

    fn memory(&self) -> Result<MemoryInfo, ProbeError> {
        host::memory()
    }

    fn battery(&self) -> Result<BatteryInfo, ProbeError> {
        power::battery(&self.root)
    }

    fn os(&self) -> Result<OsInfo, ProbeError> {
        host::os(&self.root)
    }

    fn disks(&self) -> Result<Vec<DiskInfo>, ProbeError> {
        host::disks()
    }

    fn network(&self) -> Result<Vec<NetworkInterface>, ProbeError> {
        host::network()
    }

    fn graphics_controllers(&self) -> Result<Vec<GraphicsController>, ProbeError> {
        drm::controllers(&self.root)
    }

    fn displays(&self) -> Result<Vec<DisplayInfo>, ProbeError> {
        drm::displays(&self.root)
    }
}
