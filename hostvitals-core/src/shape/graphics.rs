use super::{celsius, pair, shape_list, yes_no, Fields};
use crate::error::ShapeError;
use crate::models::{DisplayInfo, GraphicsController};
use crate::registry::{RawPayload, Shaped};

pub fn shape_graphics_controllers(raw: &RawPayload) -> Result<Shaped, ShapeError> {
    shape_list(raw, |gpu: GraphicsController| {
        Fields::new()
            .text("Vendor", gpu.vendor)
            .text("Sub-Vendor", gpu.sub_vendor)
            .text("Model", gpu.model)
            .text("Bus", gpu.bus)
            .optional("VRAM (MB)", gpu.vram_mb)
            .field("VRAM Dynamic", yes_no(gpu.vram_dynamic))
            .text("Device ID", gpu.device_id)
            .text("Driver Version", gpu.driver_version)
            .optional("Temperature GPU (°C)", gpu.temperature_celsius.map(celsius))
    })
}

pub fn shape_displays(raw: &RawPayload) -> Result<Shaped, ShapeError> {
    shape_list(raw, |display: DisplayInfo| {
        let position = match (display.position_x, display.position_y) {
            (Some(x), Some(y)) => Some(format!("{x}, {y}")),
            _ => None,
        };
        Fields::new()
            .text("Vendor", display.vendor)
            .text("Model", display.model)
            .field("Main Monitor", yes_no(display.main))
            .text("Connection", display.connection)
            .optional(
                "Resolution",
                pair(display.resolution_x, display.resolution_y, "x"),
            )
            .optional(
                "Current Resolution",
                pair(display.current_res_x, display.current_res_y, "x"),
            )
            .optional("Refresh Rate", display.refresh_rate.filter(|r| *r > 0.0))
            .optional("Position", position)
    })
}
