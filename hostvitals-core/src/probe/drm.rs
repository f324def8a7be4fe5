//! GPUs and connected monitors from the kernel DRM class (`/sys/class/drm`).

use super::sysfs::{
    file_name, link_name, read_hex, read_text, read_u64, require_dir, sorted_entries,
};
use super::{edid, pci_ids};
use crate::error::ProbeError;
use crate::models::{DisplayInfo, GraphicsController};
use std::path::{Path, PathBuf};

const INTEL: u32 = 0x8086;

fn drm_dir(root: &Path) -> Result<PathBuf, ProbeError> {
    let dir = root.join("sys/class/drm");
    require_dir(&dir, "DRM graphics class")?;
    Ok(dir)
}

/// `card0`, `card1`, ... but not connectors (`card0-DP-1`) or render nodes.
fn is_card(name: &str) -> bool {
    name.strip_prefix("card")
        .is_some_and(|index| !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()))
}

pub(crate) fn controllers(root: &Path) -> Result<Vec<GraphicsController>, ProbeError> {
    let dir = drm_dir(root)?;
    let db = pci_ids::load(root);

    let mut controllers = Vec::new();
    for card in sorted_entries(&dir)? {
        if !is_card(file_name(&card)) {
            continue;
        }
        let device = card.join("device");
        let Some(vendor_id) = read_hex(device.join("vendor")) else {
            continue;
        };
        let device_id = read_hex(device.join("device"));
        let names = pci_ids::lookup(
            db.as_deref(),
            vendor_id,
            device_id.unwrap_or_default(),
            read_hex(device.join("subsystem_vendor")),
        );
        let driver_version = link_name(device.join("driver"))
            .and_then(|driver| read_text(root.join("sys/module").join(driver).join("version")));
        let vram_mb = read_u64(device.join("mem_info_vram_total")).map(|bytes| bytes >> 20);

        controllers.push(GraphicsController {
            vendor: names.vendor,
            sub_vendor: names.sub_vendor,
            model: names
                .device
                .or_else(|| device_id.map(|id| format!("{id:04x}"))),
            bus: link_name(device.join("subsystem")).map(|bus| bus.to_uppercase()),
            vram_mb,
            // integrated Intel graphics carve VRAM out of system memory
            vram_dynamic: vram_mb.is_none() && vendor_id == INTEL,
            device_id: device_id.map(|id| format!("{vendor_id:04x}:{id:04x}")),
            driver_version,
            temperature_celsius: gpu_temperature(&device),
        });
    }
    Ok(controllers)
}

fn gpu_temperature(device: &Path) -> Option<f32> {
    sorted_entries(&device.join("hwmon"))
        .ok()?
        .iter()
        .find_map(|hwmon| read_u64(hwmon.join("temp1_input")))
        .map(|millidegrees| millidegrees as f32 / 1000.0)
}

pub(crate) fn displays(root: &Path) -> Result<Vec<DisplayInfo>, ProbeError> {
    let dir = drm_dir(root)?;

    let mut displays = Vec::new();
    for connector in sorted_entries(&dir)? {
        let name = file_name(&connector);
        let Some((card, port)) = name.split_once('-') else {
            continue;
        };
        if !is_card(card) || read_text(connector.join("status")).as_deref() != Some("connected") {
            continue;
        }

        let edid = std::fs::read(connector.join("edid"))
            .ok()
            .and_then(|bytes| edid::parse(&bytes))
            .unwrap_or_default();
        let first_mode = read_text(connector.join("modes"))
            .and_then(|modes| modes.lines().next().and_then(parse_mode));
        let (resolution_x, resolution_y) = match (edid.width, edid.height, first_mode) {
            (Some(x), Some(y), _) => (Some(x), Some(y)),
            (_, _, Some((x, y))) => (Some(x), Some(y)),
            _ => (None, None),
        };

        displays.push(DisplayInfo {
            vendor: edid.vendor,
            model: edid.model,
            main: false,
            connection: Some(connection_kind(port).to_string()),
            resolution_x,
            resolution_y,
            current_res_x: None,
            current_res_y: None,
            refresh_rate: edid.refresh_rate,
            position_x: None,
            position_y: None,
        });
    }

    // built-in panels come first; the first display is the main one
    displays.sort_by_key(|d| !matches!(d.connection.as_deref(), Some("eDP" | "LVDS" | "DSI")));
    if let Some(main) = displays.first_mut() {
        main.main = true;
    }
    Ok(displays)
}

/// `1920x1080` (optionally followed by `i` for interlaced).
fn parse_mode(mode: &str) -> Option<(u32, u32)> {
    let (x, y) = mode.trim().split_once('x')?;
    let y: String = y.chars().take_while(|c| c.is_ascii_digit()).collect();
    Some((x.parse().ok()?, y.parse().ok()?))
}

/// Connector port (`HDMI-A-1`) to its connection kind.
fn connection_kind(port: &str) -> &str {
    let kind = port
        .rsplit_once('-')
        .filter(|(_, index)| index.chars().all(|c| c.is_ascii_digit()))
        .map_or(port, |(kind, _)| kind);
    match kind {
        "HDMI-A" | "HDMI-B" => "HDMI",
        "DP" => "DisplayPort",
        "DVI-D" | "DVI-I" | "DVI-A" => "DVI",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(path: PathBuf, value: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, value).unwrap();
    }

    #[test]
    fn card_names() {
        assert!(is_card("card0"));
        assert!(is_card("card12"));
        assert!(!is_card("card0-DP-1"));
        assert!(!is_card("renderD128"));
        assert!(!is_card("card"));
    }

    #[test]
    fn modes_and_ports() {
        assert_eq!(parse_mode("2560x1440\n"), Some((2560, 1440)));
        assert_eq!(parse_mode("1920x1080i"), Some((1920, 1080)));
        assert_eq!(parse_mode("bogus"), None);
        assert_eq!(connection_kind("HDMI-A-1"), "HDMI");
        assert_eq!(connection_kind("DP-2"), "DisplayPort");
        assert_eq!(connection_kind("eDP-1"), "eDP");
        assert_eq!(connection_kind("Virtual-1"), "Virtual");
    }

    #[test]
    fn reads_controller_without_pci_database() {
        let root = TempDir::new().unwrap();
        let device = root.path().join("sys/class/drm/card0/device");
        write(device.join("vendor"), "0x8086\n");
        write(device.join("device"), "0x46a6\n");
        write(device.join("hwmon/hwmon3/temp1_input"), "52000\n");
        write(root.path().join("sys/class/drm/renderD128/dev"), "226:128\n");

        let controllers = controllers(root.path()).unwrap();
        assert_eq!(controllers.len(), 1);
        let gpu = &controllers[0];
        assert_eq!(gpu.vendor.as_deref(), Some("Intel Corporation"));
        assert_eq!(gpu.model.as_deref(), Some("46a6"));
        assert_eq!(gpu.device_id.as_deref(), Some("8086:46a6"));
        assert!(gpu.vram_dynamic);
        assert_eq!(gpu.temperature_celsius, Some(52.0));
    }

    #[test]
    fn only_connected_displays_with_builtin_first() {
        let drm = TempDir::new().unwrap();
        let class = drm.path().join("sys/class/drm");
        write(class.join("card0-DP-1/status"), "connected\n");
        write(class.join("card0-DP-1/modes"), "3840x2160\n1920x1080\n");
        write(class.join("card0-HDMI-A-1/status"), "disconnected\n");
        write(class.join("card0-eDP-1/status"), "connected\n");
        write(class.join("card0-eDP-1/modes"), "1920x1200\n");

        let displays = displays(drm.path()).unwrap();
        assert_eq!(displays.len(), 2);
        assert_eq!(displays[0].connection.as_deref(), Some("eDP"));
        assert!(displays[0].main);
        assert_eq!(displays[1].connection.as_deref(), Some("DisplayPort"));
        assert_eq!(displays[1].resolution_x, Some(3840));
        assert!(!displays[1].main);
    }

    #[test]
    fn missing_class_is_unavailable() {
        let root = TempDir::new().unwrap();
        assert!(matches!(
            controllers(root.path()),
            Err(ProbeError::Unavailable(_))
        ));
    }
}
