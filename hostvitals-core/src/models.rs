//! Raw facet payloads as returned by the OS-inspection layer.
//!
//! Optional fields are `None` when the host does not expose them; shapers
//! render those as "N/A".

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChassisInfo {
    /// SMBIOS chassis type code.
    pub chassis_type: Option<u32>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeInfo {
    /// RFC 3339 local time at the moment of the query.
    pub current: String,
    pub utc_offset_seconds: i32,
    /// IANA zone name such as `Europe/Berlin`.
    pub timezone_name: Option<String>,
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub hostname: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    pub vendor_id: String,
    pub brand: String,
    pub frequency_mhz: u64,
    pub cores: usize,
    pub physical_cores: Option<usize>,
    /// Only present on hybrid parts.
    pub performance_cores: Option<usize>,
    pub efficiency_cores: Option<usize>,
    pub virtualization: bool,
    pub temperature_celsius: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseboardInfo {
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiosInfo {
    pub vendor: Option<String>,
    pub version: Option<String>,
    pub release_date: Option<String>,
}

/// Memory figures in bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfo {
    pub total: u64,
    pub free: u64,
    pub used: u64,
    pub available: Option<u64>,
    pub swap_total: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatteryInfo {
    pub has_battery: bool,
    pub is_charging: bool,
    pub percent: Option<f64>,
    pub cycle_count: Option<u32>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub time_remaining_minutes: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OsInfo {
    pub platform: String,
    pub distro: Option<String>,
    pub release: Option<String>,
    pub codename: Option<String>,
    pub kernel: Option<String>,
    pub arch: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskInfo {
    pub device: String,
    pub kind: String,
    pub size_bytes: u64,
    pub mount_point: String,
    pub file_system: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub name: String,
    pub ip4: Option<String>,
    pub ip6: Option<String>,
    /// Loopback and other host-internal interfaces.
    #[serde(default)]
    pub internal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphicsController {
    pub vendor: Option<String>,
    pub sub_vendor: Option<String>,
    pub model: Option<String>,
    pub bus: Option<String>,
    pub vram_mb: Option<u64>,
    #[serde(default)]
    pub vram_dynamic: bool,
    pub device_id: Option<String>,
    pub driver_version: Option<String>,
    pub temperature_celsius: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayInfo {
    pub vendor: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub main: bool,
    pub connection: Option<String>,
    pub resolution_x: Option<u32>,
    pub resolution_y: Option<u32>,
    pub current_res_x: Option<u32>,
    pub current_res_y: Option<u32>,
    pub refresh_rate: Option<f64>,
    pub position_x: Option<i32>,
    pub position_y: Option<i32>,
}
