use super::{gigabytes, shape_list, Fields};
use crate::error::ShapeError;
use crate::models::DiskInfo;
use crate::registry::{RawPayload, Shaped};

pub fn shape_disks(raw: &RawPayload) -> Result<Shaped, ShapeError> {
    shape_list(raw, |disk: DiskInfo| {
        Fields::new()
            .field("Device", disk.device)
            .field("Type", disk.kind)
            .field("Size (GB)", gigabytes(disk.size_bytes))
            .field("Mount Point", disk.mount_point)
            .text("File System", disk.file_system)
    })
}
