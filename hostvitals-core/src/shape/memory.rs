use super::{decode, gigabytes, Fields};
use crate::error::ShapeError;
use crate::models::MemoryInfo;
use crate::registry::{RawPayload, Shaped};

pub fn shape_memory(raw: &RawPayload) -> Result<Shaped, ShapeError> {
    let memory: MemoryInfo = decode(raw)?;
    Ok(Fields::new()
        .field("Total Memory (GB)", gigabytes(memory.total))
        .field("Free Memory (GB)", gigabytes(memory.free))
        .field("Used Memory (GB)", gigabytes(memory.used))
        .optional("Available Memory (GB)", memory.available.map(gigabytes))
        .optional("Swap Total (GB)", memory.swap_total.map(gigabytes))
        .into())
}
