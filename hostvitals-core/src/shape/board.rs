use super::{decode, Fields};
use crate::error::ShapeError;
use crate::models::{BaseboardInfo, BiosInfo, ChassisInfo, SystemInfo};
use crate::registry::{RawPayload, Shaped};

/// SMBIOS 3.x chassis type names, indexed by code - 1.
const CHASSIS_TYPES: [&str; 36] = [
    "Other",
    "Unknown",
    "Desktop",
    "Low Profile Desktop",
    "Pizza Box",
    "Mini Tower",
    "Tower",
    "Portable",
    "Laptop",
    "Notebook",
    "Hand Held",
    "Docking Station",
    "All in One",
    "Sub Notebook",
    "Space-Saving",
    "Lunch Box",
    "Main System Chassis",
    "Expansion Chassis",
    "SubChassis",
    "Bus Expansion Chassis",
    "Peripheral Chassis",
    "RAID Chassis",
    "Rack Mount Chassis",
    "Sealed-Case PC",
    "Multi-System Chassis",
    "Compact PCI",
    "Advanced TCA",
    "Blade",
    "Blade Enclosure",
    "Tablet",
    "Convertible",
    "Detachable",
    "IoT Gateway",
    "Embedded PC",
    "Mini PC",
    "Stick PC",
];

pub(crate) fn chassis_type_name(code: u32) -> Option<&'static str> {
    // the high bit flags a chassis lock and is not part of the type
    let code = code & 0x7f;
    CHASSIS_TYPES.get(code.checked_sub(1)? as usize).copied()
}

pub fn shape_chassis(raw: &RawPayload) -> Result<Shaped, ShapeError> {
    let chassis: ChassisInfo = decode(raw)?;
    Ok(Fields::new()
        .optional("Type", chassis.chassis_type.and_then(chassis_type_name))
        .text("Manufacturer", chassis.manufacturer)
        .text("Model", chassis.model)
        .into())
}

pub fn shape_system(raw: &RawPayload) -> Result<Shaped, ShapeError> {
    let system: SystemInfo = decode(raw)?;
    Ok(Fields::new()
        .text("Manufacturer", system.manufacturer)
        .text("Model", system.model)
        .text("Hostname", system.hostname)
        .into())
}

pub fn shape_baseboard(raw: &RawPayload) -> Result<Shaped, ShapeError> {
    let board: BaseboardInfo = decode(raw)?;
    Ok(Fields::new()
        .text("Manufacturer", board.manufacturer)
        .text("Model", board.model)
        .text("Version", board.version)
        .into())
}

pub fn shape_bios(raw: &RawPayload) -> Result<Shaped, ShapeError> {
    let bios: BiosInfo = decode(raw)?;
    Ok(Fields::new()
        .text("Vendor", bios.vendor)
        .text("Version", bios.version)
        .text("Release Date", bios.release_date)
        .into())
}
