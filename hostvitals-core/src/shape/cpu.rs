use super::{celsius, decode, supported, Fields};
use crate::error::ShapeError;
use crate::models::CpuInfo;
use crate::registry::{RawPayload, Shaped};

fn manufacturer(vendor_id: &str) -> &str {
    match vendor_id.trim() {
        "GenuineIntel" => "Intel",
        "AuthenticAMD" | "AMDisbetter!" => "AMD",
        "CentaurHauls" => "Centaur",
        "HygonGenuine" => "Hygon",
        other => other,
    }
}

pub fn shape_cpu(raw: &RawPayload) -> Result<Shaped, ShapeError> {
    let cpu: CpuInfo = decode(raw)?;
    let speed_ghz = format!("{:.2}", cpu.frequency_mhz as f64 / 1000.0);
    Ok(Fields::new()
        .text("Manufacturer", Some(manufacturer(&cpu.vendor_id).to_string()))
        .text("Brand", Some(cpu.brand.trim().to_string()))
        .field("Speed (GHz)", speed_ghz)
        .field("Cores", cpu.cores)
        .optional("Physical Cores", cpu.physical_cores)
        .optional("Performance Cores", cpu.performance_cores)
        .optional("Efficiency Cores", cpu.efficiency_cores)
        .field("Virtualization", supported(cpu.virtualization))
        .optional("CPU Temperature (°C)", cpu.temperature_celsius.map(celsius))
        .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hybrid_cpu() {
        let shaped = shape_cpu(&json!({
            "vendor_id": "GenuineIntel",
            "brand": "13th Gen Intel(R) Core(TM) i7-1360P ",
            "frequency_mhz": 2200,
            "cores": 16,
            "physical_cores": 12,
            "performance_cores": 4,
            "efficiency_cores": 8,
            "virtualization": true,
            "temperature_celsius": 47.0
        }))
        .unwrap();

        assert_eq!(
            shaped,
            json!({
                "Manufacturer": "Intel",
                "Brand": "13th Gen Intel(R) Core(TM) i7-1360P",
                "Speed (GHz)": "2.20",
                "Cores": 16,
                "Physical Cores": 12,
                "Performance Cores": 4,
                "Efficiency Cores": 8,
                "Virtualization": "Supported",
                "CPU Temperature (°C)": 47.0
            })
        );
    }

    #[test]
    fn non_hybrid_cpu_without_sensors() {
        let shaped = shape_cpu(&json!({
            "vendor_id": "AuthenticAMD",
            "brand": "AMD Ryzen 7 5800X 8-Core Processor",
            "frequency_mhz": 3800,
            "cores": 16,
            "virtualization": false
        }))
        .unwrap();

        assert_eq!(shaped["Manufacturer"], "AMD");
        assert_eq!(shaped["Physical Cores"], "N/A");
        assert_eq!(shaped["Performance Cores"], "N/A");
        assert_eq!(shaped["Efficiency Cores"], "N/A");
        assert_eq!(shaped["Virtualization"], "Not Supported");
        assert_eq!(shaped["CPU Temperature (°C)"], "N/A");
    }

    #[test]
    fn missing_required_field_is_a_shape_error() {
        let err = shape_cpu(&json!({ "brand": "x" })).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }
}
