//! Firmware tables exposed under `/sys/class/dmi/id`.

use super::sysfs::{read_dmi, read_u64, require_dir};
use crate::error::ProbeError;
use crate::models::{BaseboardInfo, BiosInfo, ChassisInfo, SystemInfo};
use std::path::{Path, PathBuf};

fn dmi_dir(root: &Path) -> Result<PathBuf, ProbeError> {
    let dir = root.join("sys/class/dmi/id");
    require_dir(&dir, "DMI firmware table")?;
    Ok(dir)
}

pub(crate) fn chassis(root: &Path) -> Result<ChassisInfo, ProbeError> {
    let dir = dmi_dir(root)?;
    Ok(ChassisInfo {
        chassis_type: read_u64(dir.join("chassis_type")).map(|code| code as u32),
        manufacturer: read_dmi(dir.join("chassis_vendor")),
        model: read_dmi(dir.join("chassis_version")),
    })
}

pub(crate) fn system(root: &Path, hostname: Option<String>) -> Result<SystemInfo, ProbeError> {
    let dir = dmi_dir(root)?;
    Ok(SystemInfo {
        manufacturer: read_dmi(dir.join("sys_vendor")),
        model: read_dmi(dir.join("product_name")),
        hostname,
    })
}

pub(crate) fn baseboard(root: &Path) -> Result<BaseboardInfo, ProbeError> {
    let dir = dmi_dir(root)?;
    Ok(BaseboardInfo {
        manufacturer: read_dmi(dir.join("board_vendor")),
        model: read_dmi(dir.join("board_name")),
        version: read_dmi(dir.join("board_version")),
    })
}

pub(crate) fn bios(root: &Path) -> Result<BiosInfo, ProbeError> {
    let dir = dmi_dir(root)?;
    Ok(BiosInfo {
        vendor: read_dmi(dir.join("bios_vendor")),
        version: read_dmi(dir.join("bios_version")),
        release_date: read_dmi(dir.join("bios_date")),
    })
}
