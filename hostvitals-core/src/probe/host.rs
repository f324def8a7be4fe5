//! Facets answered by `sysinfo`, enriched with a few procfs/sysfs reads.

use super::sysfs::{parse_cpu_list, read_text, read_u64, sorted_entries};
use crate::error::ProbeError;
use crate::models::{CpuInfo, DiskInfo, MemoryInfo, NetworkInterface, OsInfo, TimeInfo};
use chrono::Local;
use std::collections::HashSet;
use std::net::IpAddr;
use std::path::Path;
use sysinfo::{DiskKind, Disks, Networks, System};

/// hwmon drivers that report the CPU package temperature as `temp1`.
const CPU_SENSORS: [&str; 4] = ["coretemp", "k10temp", "zenpower", "cpu_thermal"];

pub(crate) fn cpu(root: &Path) -> Result<CpuInfo, ProbeError> {
    let mut sys = System::new();
    sys.refresh_cpu_all();

    let cpus = sys.cpus();
    let first = cpus
        .first()
        .ok_or_else(|| ProbeError::Unavailable("CPU information".into()))?;

    Ok(CpuInfo {
        vendor_id: first.vendor_id().to_string(),
        brand: first.brand().to_string(),
        frequency_mhz: first.frequency(),
        cores: cpus.len(),
        physical_cores: System::physical_core_count(),
        performance_cores: hybrid_cores(root, "cpu_core"),
        efficiency_cores: hybrid_cores(root, "cpu_atom"),
        virtualization: has_virtualization(root),
        temperature_celsius: cpu_temperature(root),
    })
}

/// Physical cores behind one PMU of a hybrid Intel part (`cpu_core` or
/// `cpu_atom`). SMT siblings share a `core_id` within their package.
fn hybrid_cores(root: &Path, pmu: &str) -> Option<usize> {
    let cpus = parse_cpu_list(&read_text(root.join("sys/devices").join(pmu).join("cpus"))?)?;
    let cores: HashSet<_> = cpus
        .into_iter()
        .map(|cpu| {
            let topology = root.join(format!("sys/devices/system/cpu/cpu{cpu}/topology"));
            match read_u64(topology.join("core_id")) {
                Some(core) => (read_u64(topology.join("physical_package_id")), core, None),
                // no topology: count the logical CPU on its own
                None => (None, 0, Some(cpu)),
            }
        })
        .collect();
    Some(cores.len())
}

fn has_virtualization(root: &Path) -> bool {
    read_text(root.join("proc/cpuinfo"))
        .map(|cpuinfo| cpu_flags_have_virtualization(&cpuinfo))
        .unwrap_or(false)
}

pub(crate) fn cpu_flags_have_virtualization(cpuinfo: &str) -> bool {
    cpuinfo
        .lines()
        .filter(|line| line.starts_with("flags") || line.starts_with("Features"))
        .flat_map(|line| line.split_once(':').map(|(_, flags)| flags).into_iter())
        .flat_map(str::split_whitespace)
        .any(|flag| flag == "vmx" || flag == "svm")
}

fn cpu_temperature(root: &Path) -> Option<f32> {
    sorted_entries(&root.join("sys/class/hwmon"))
        .ok()?
        .into_iter()
        .find(|hwmon| {
            read_text(hwmon.join("name")).is_some_and(|name| CPU_SENSORS.contains(&name.as_str()))
        })
        .and_then(|hwmon| read_u64(hwmon.join("temp1_input")))
        .map(|millidegrees| millidegrees as f32 / 1000.0)
}

pub(crate) fn memory() -> Result<MemoryInfo, ProbeError> {
    let mut sys = System::new();
    sys.refresh_memory();

    let total = sys.total_memory();
    if total == 0 {
        return Err(ProbeError::Unavailable("memory information".into()));
    }
    let swap_total = sys.total_swap();
    Ok(MemoryInfo {
        total,
        free: sys.free_memory(),
        used: sys.used_memory(),
        available: Some(sys.available_memory()),
        swap_total: (swap_total > 0).then_some(swap_total),
    })
}

pub(crate) fn os(root: &Path) -> Result<OsInfo, ProbeError> {
    let codename = read_text(root.join("etc/os-release"))
        .and_then(|release| os_release_value(&release, "VERSION_CODENAME"));
    Ok(OsInfo {
        platform: std::env::consts::OS.to_string(),
        distro: System::long_os_version().or_else(System::name),
        release: System::os_version(),
        codename,
        kernel: System::kernel_version(),
        arch: std::env::consts::ARCH.to_string(),
    })
}

pub(crate) fn os_release_value(release: &str, key: &str) -> Option<String> {
    release.lines().find_map(|line| {
        let (k, v) = line.split_once('=')?;
        (k.trim() == key)
            .then(|| v.trim().trim_matches('"').to_string())
            .filter(|v| !v.is_empty())
    })
}

/// `tz` is the value of `TZ` captured by the caller, if any.
pub(crate) fn time(root: &Path, tz: Option<&str>) -> Result<TimeInfo, ProbeError> {
    let now = Local::now();
    Ok(TimeInfo {
        current: now.to_rfc3339(),
        utc_offset_seconds: now.offset().local_minus_utc(),
        timezone_name: timezone_name(root, tz),
        uptime_seconds: System::uptime(),
    })
}

/// IANA zone from `TZ`, `/etc/timezone`, or the `/etc/localtime` symlink.
fn timezone_name(root: &Path, tz: Option<&str>) -> Option<String> {
    if let Some(tz) = tz.map(|tz| tz.trim().trim_start_matches(':').trim()) {
        if !tz.is_empty() {
            return Some(tz.to_string());
        }
    }
    if let Some(tz) = read_text(root.join("etc/timezone")) {
        return Some(tz);
    }
    let target = std::fs::read_link(root.join("etc/localtime")).ok()?;
    let target = target.to_str()?;
    target
        .split_once("zoneinfo/")
        .map(|(_, zone)| zone.to_string())
}

pub(crate) fn disks() -> Result<Vec<DiskInfo>, ProbeError> {
    let disks = Disks::new_with_refreshed_list();
    Ok(disks
        .list()
        .iter()
        .map(|disk| DiskInfo {
            device: disk.name().to_string_lossy().to_string(),
            kind: disk_kind(disk.kind()).to_string(),
            size_bytes: disk.total_space(),
            mount_point: disk.mount_point().to_string_lossy().to_string(),
            file_system: Some(disk.file_system().to_string_lossy().to_string()),
        })
        .collect())
}

fn disk_kind(kind: DiskKind) -> &'static str {
    match kind {
        DiskKind::HDD => "HDD",
        DiskKind::SSD => "SSD",
        DiskKind::Unknown(_) => "Unknown",
    }
}

pub(crate) fn network() -> Result<Vec<NetworkInterface>, ProbeError> {
    let networks = Networks::new_with_refreshed_list();
    let mut interfaces: Vec<NetworkInterface> = networks
        .iter()
        .map(|(name, data)| {
            let addrs: Vec<IpAddr> = data.ip_networks().iter().map(|net| net.addr).collect();
            interface(name, &addrs)
        })
        .collect();
    interfaces.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(interfaces)
}

pub(crate) fn interface(name: &str, addrs: &[IpAddr]) -> NetworkInterface {
    let internal = name == "lo" || (!addrs.is_empty() && addrs.iter().all(IpAddr::is_loopback));
    let routable = addrs.iter().filter(|addr| !addr.is_loopback());
    let ip4 = routable.clone().find(|addr| addr.is_ipv4());
    // global or unique-local before fe80::/10
    let ip6 = routable
        .clone()
        .find(|addr| matches!(addr, IpAddr::V6(v6) if v6.segments()[0] & 0xffc0 != 0xfe80))
        .or_else(|| routable.clone().find(|addr| addr.is_ipv6()));
    NetworkInterface {
        name: name.to_string(),
        ip4: ip4.map(IpAddr::to_string),
        ip6: ip6.map(IpAddr::to_string),
        internal,
    }
}

/// Hostname is carried by the System facet.
pub(crate) fn hostname() -> Option<String> {
    System::host_name()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn virtualization_flags() {
        let intel = "processor\t: 0\nflags\t\t: fpu vme de pse vmx ept\n";
        let amd = "flags\t\t: fpu svm npt\n";
        let none = "flags\t\t: fpu vme de\n";
        assert!(cpu_flags_have_virtualization(intel));
        assert!(cpu_flags_have_virtualization(amd));
        assert!(!cpu_flags_have_virtualization(none));
        assert!(!cpu_flags_have_virtualization(""));
    }

    #[test]
    fn os_release_parsing() {
        let release = "NAME=\"Ubuntu\"\nVERSION_CODENAME=jammy\nID=ubuntu\nEMPTY=\"\"\n";
        assert_eq!(
            os_release_value(release, "VERSION_CODENAME").as_deref(),
            Some("jammy")
        );
        assert_eq!(os_release_value(release, "NAME").as_deref(), Some("Ubuntu"));
        assert_eq!(os_release_value(release, "EMPTY"), None);
        assert_eq!(os_release_value(release, "MISSING"), None);
    }

    #[test]
    fn interface_addresses() {
        let lo = interface("lo", &["127.0.0.1".parse().unwrap(), "::1".parse().unwrap()]);
        assert!(lo.internal);
        assert_eq!(lo.ip4, None);

        let eth = interface(
            "eth0",
            &["fe80::1".parse().unwrap(), "192.168.1.5".parse().unwrap()],
        );
        assert!(!eth.internal);
        assert_eq!(eth.ip4.as_deref(), Some("192.168.1.5"));
        assert_eq!(eth.ip6.as_deref(), Some("fe80::1"));

        let dual = interface(
            "wlan0",
            &[
                "fe80::1c2b:3aff:fe4d:5e6f".parse().unwrap(),
                "2001:db8::42".parse().unwrap(),
                "10.0.0.7".parse().unwrap(),
            ],
        );
        assert_eq!(dual.ip4.as_deref(), Some("10.0.0.7"));
        assert_eq!(dual.ip6.as_deref(), Some("2001:db8::42"));
    }

    #[test]
    fn disk_kinds() {
        assert_eq!(disk_kind(DiskKind::SSD), "SSD");
        assert_eq!(disk_kind(DiskKind::HDD), "HDD");
        assert_eq!(disk_kind(DiskKind::Unknown(-1)), "Unknown");
    }

    fn write_topology(root: &Path, cpu: usize, package: u64, core: u64) {
        let dir = root.join(format!("sys/devices/system/cpu/cpu{cpu}/topology"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("physical_package_id"), format!("{package}\n")).unwrap();
        fs::write(dir.join("core_id"), format!("{core}\n")).unwrap();
    }

    #[test]
    fn hybrid_cores_count_smt_siblings_once() {
        let root = TempDir::new().unwrap();
        for pmu in ["cpu_core", "cpu_atom"] {
            fs::create_dir_all(root.path().join("sys/devices").join(pmu)).unwrap();
        }
        fs::write(root.path().join("sys/devices/cpu_core/cpus"), "0-7\n").unwrap();
        fs::write(root.path().join("sys/devices/cpu_atom/cpus"), "8-15\n").unwrap();
        // four hyperthreaded P-cores, eight single-threaded E-cores
        for cpu in 0..8 {
            write_topology(root.path(), cpu, 0, (cpu / 2) as u64 * 4);
        }
        for cpu in 8..16 {
            write_topology(root.path(), cpu, 0, 16 + cpu as u64);
        }

        assert_eq!(hybrid_cores(root.path(), "cpu_core"), Some(4));
        assert_eq!(hybrid_cores(root.path(), "cpu_atom"), Some(8));
        assert_eq!(hybrid_cores(root.path(), "cpu_none"), None);
    }

    #[test]
    fn hybrid_cores_without_topology_count_logical_cpus() {
        let root = TempDir::new().unwrap();
        let pmu = root.path().join("sys/devices/cpu_core");
        fs::create_dir_all(&pmu).unwrap();
        fs::write(pmu.join("cpus"), "0-3\n").unwrap();

        assert_eq!(hybrid_cores(root.path(), "cpu_core"), Some(4));
    }

    #[test]
    fn timezone_from_etc_timezone() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("etc")).unwrap();
        fs::write(root.path().join("etc/timezone"), "Europe/Berlin\n").unwrap();

        assert_eq!(
            timezone_name(root.path(), None).as_deref(),
            Some("Europe/Berlin")
        );
        assert_eq!(
            timezone_name(root.path(), Some(":America/New_York")).as_deref(),
            Some("America/New_York")
        );
        assert_eq!(
            timezone_name(root.path(), Some("  ")).as_deref(),
            Some("Europe/Berlin")
        );
    }

    #[cfg(unix)]
    #[test]
    fn timezone_from_localtime_link() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("etc")).unwrap();
        std::os::unix::fs::symlink(
            "/usr/share/zoneinfo/Asia/Tokyo",
            root.path().join("etc/localtime"),
        )
        .unwrap();

        assert_eq!(timezone_name(root.path(), None).as_deref(), Some("Asia/Tokyo"));
    }

    #[test]
    fn timezone_missing() {
        let root = TempDir::new().unwrap();
        assert_eq!(timezone_name(root.path(), None), None);
    }

    #[test]
    fn cpu_temperature_from_hwmon() {
        let root = TempDir::new().unwrap();
        let acpi = root.path().join("sys/class/hwmon/hwmon0");
        let core = root.path().join("sys/class/hwmon/hwmon1");
        fs::create_dir_all(&acpi).unwrap();
        fs::create_dir_all(&core).unwrap();
        fs::write(acpi.join("name"), "acpitz\n").unwrap();
        fs::write(acpi.join("temp1_input"), "27800\n").unwrap();
        fs::write(core.join("name"), "coretemp\n").unwrap();
        fs::write(core.join("temp1_input"), "46500\n").unwrap();

        assert_eq!(cpu_temperature(root.path()), Some(46.5));
    }
}
