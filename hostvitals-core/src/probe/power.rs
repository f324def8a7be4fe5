//! Batteries under `/sys/class/power_supply`.

use super::sysfs::{read_text, read_u64, require_dir, sorted_entries};
use crate::error::ProbeError;
use crate::models::BatteryInfo;
use std::path::Path;

pub(crate) fn battery(root: &Path) -> Result<BatteryInfo, ProbeError> {
    let dir = root.join("sys/class/power_supply");
    require_dir(&dir, "power supply class")?;

    // peripheral batteries (mice, headsets) report scope "Device"
    let Some(supply) = sorted_entries(&dir)?.into_iter().find(|supply| {
        read_text(supply.join("type")).as_deref() == Some("Battery")
            && read_text(supply.join("scope")).as_deref() != Some("Device")
    }) else {
        return Ok(BatteryInfo::default());
    };

    let status = read_text(supply.join("status")).unwrap_or_default();
    let is_charging = status == "Charging";

    Ok(BatteryInfo {
        has_battery: true,
        is_charging,
        percent: read_u64(supply.join("capacity")).map(|p| p as f64),
        cycle_count: read_u64(supply.join("cycle_count"))
            .filter(|c| *c > 0)
            .map(|c| c as u32),
        manufacturer: read_text(supply.join("manufacturer")),
        model: read_text(supply.join("model_name")),
        time_remaining_minutes: (status == "Discharging")
            .then(|| minutes_remaining(&supply))
            .flatten(),
    })
}

/// Remaining runtime from energy/power (µWh, µW) or charge/current (µAh, µA).
fn minutes_remaining(supply: &Path) -> Option<u64> {
    let (stored, rate) = match (
        read_u64(supply.join("energy_now")),
        read_u64(supply.join("power_now")),
    ) {
        (Some(energy), Some(power)) => (energy, power),
        _ => (
            read_u64(supply.join("charge_now"))?,
            read_u64(supply.join("current_now"))?,
        ),
    };
    (rate > 0).then(|| stored * 60 / rate)
}
