use super::{charging, decode, yes_no, Fields};
use crate::error::ShapeError;
use crate::models::BatteryInfo;
use crate::registry::{RawPayload, Shaped};

pub fn shape_battery(raw: &RawPayload) -> Result<Shaped, ShapeError> {
    let battery: BatteryInfo = decode(raw)?;
    Ok(Fields::new()
        .field("Has Battery", yes_no(battery.has_battery))
        .field("Charging Status", charging(battery.is_charging))
        .optional(
            "Battery Percentage",
            battery.percent.map(|p| format!("{}%", p.round())),
        )
        .optional("Cycle Count", battery.cycle_count)
        .text("Battery Manufacturer", battery.manufacturer)
        .text("Battery Model", battery.model)
        .optional(
            "Time Remaining",
            battery
                .time_remaining_minutes
                .filter(|m| *m > 0)
                .map(|m| format!("{m} minutes")),
        )
        .into())
}
