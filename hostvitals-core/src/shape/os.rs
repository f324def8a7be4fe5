use super::{decode, Fields};
use crate::error::ShapeError;
use crate::models::{OsInfo, TimeInfo};
use crate::registry::{RawPayload, Shaped};

pub fn shape_os(raw: &RawPayload) -> Result<Shaped, ShapeError> {
    let os: OsInfo = decode(raw)?;
    Ok(Fields::new()
        .field("Platform", os.platform)
        .text("Distribution", os.distro)
        .text("Release Version", os.release)
        .text("Codename", os.codename)
        .text("Kernel", os.kernel)
        .field("Architecture", os.arch)
        .into())
}

pub fn shape_time(raw: &RawPayload) -> Result<Shaped, ShapeError> {
    let time: TimeInfo = decode(raw)?;
    Ok(Fields::new()
        .field("Current Time", time.current)
        .field("Current Timezone", utc_offset(time.utc_offset_seconds))
        .text("Timezone Location", time.timezone_name)
        .field("Uptime", uptime(time.uptime_seconds))
        .into())
}

fn utc_offset(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    format!("UTC{sign}{:02}:{:02}", minutes / 60, minutes % 60)
}

fn uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = seconds % 86_400 / 3_600;
    let minutes = seconds % 3_600 / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}
