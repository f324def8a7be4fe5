//! Shapers: pure conversions from raw facet payloads to the display schema.

mod board;
mod cpu;
mod graphics;
mod memory;
mod network;
mod os;
mod power;
mod storage;

pub use board::{shape_baseboard, shape_bios, shape_chassis, shape_system};
pub use cpu::shape_cpu;
pub use graphics::{shape_displays, shape_graphics_controllers};
pub use memory::shape_memory;
pub use network::shape_network;
pub use os::{shape_os, shape_time};
pub use power::shape_battery;
pub use storage::shape_disks;

use crate::error::ShapeError;
use crate::registry::{RawPayload, Shaped};
use crate::report::failure_marker;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Marker used for any optional field the host did not report.
pub const NOT_AVAILABLE: &str = "N/A";

const BYTES_PER_GB: f64 = (1u64 << 30) as f64;

/// Ordered field map for one shaped object.
#[derive(Debug, Default, Clone)]
pub struct Fields(Map<String, Value>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Inserts `value`, or [`NOT_AVAILABLE`] when it is absent.
    pub fn optional<T: Into<Value>>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.field(key, value),
            None => self.field(key, NOT_AVAILABLE),
        }
    }

    /// Like [`Fields::optional`], treating blank text as absent.
    pub fn text(self, key: &str, value: Option<String>) -> Self {
        self.optional(key, value.filter(|s| !s.trim().is_empty()))
    }
}

impl From<Fields> for Value {
    fn from(fields: Fields) -> Self {
        Value::Object(fields.0)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(raw: &RawPayload) -> Result<T, ShapeError> {
    Ok(T::deserialize(raw)?)
}

/// Shapes each element of a list payload on its own. Elements that do not
/// decode become failure markers; the rest are kept.
pub(crate) fn shape_list<T: DeserializeOwned>(
    raw: &RawPayload,
    shape_one: impl Fn(T) -> Fields,
) -> Result<Shaped, ShapeError> {
    let items = raw
        .as_array()
        .ok_or_else(|| ShapeError::new("expected a list"))?;
    let shaped = items
        .iter()
        .map(|item| match decode::<T>(item) {
            Ok(item) => shape_one(item).into(),
            Err(err) => failure_marker(&format!("shape error: {err}")),
        })
        .collect();
    Ok(Value::Array(shaped))
}

/// Bytes to gigabytes (2^30), two decimals.
pub fn gigabytes(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / BYTES_PER_GB)
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

pub fn supported(value: bool) -> &'static str {
    if value {
        "Supported"
    } else {
        "Not Supported"
    }
}

pub fn charging(value: bool) -> &'static str {
    if value {
        "Charging"
    } else {
        "Not Charging"
    }
}

/// `"<x>x<y>"` when both sides are known.
pub(crate) fn pair(x: Option<u32>, y: Option<u32>, sep: &str) -> Option<String> {
    Some(format!("{}{sep}{}", x?, y?))
}

pub(crate) fn celsius(value: f32) -> f64 {
    (f64::from(value) * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn gigabyte_conversion() {
        assert_eq!(gigabytes(8 * (1 << 30)), "8.00");
        assert_eq!(gigabytes(0), "0.00");
        assert_eq!(gigabytes(1_610_612_736), "1.50");
    }

    #[test]
    fn optional_fields_render_marker() {
        let value: Value = Fields::new()
            .optional("Present", Some(4))
            .optional::<u32>("Missing", None)
            .text("Blank", Some("  ".into()))
            .into();
        assert_eq!(
            value,
            json!({ "Present": 4, "Missing": "N/A", "Blank": "N/A" })
        );
    }

    #[test]
    fn field_order_is_insertion_order() {
        let value: Value = Fields::new().field("b", 1).field("a", 2).into();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[derive(Deserialize)]
    struct Item {
        name: String,
    }

    #[test]
    fn list_elements_fail_independently() {
        let raw = json!([{ "name": "a" }, { "nope": 1 }, { "name": "c" }]);
        let shaped = shape_list(&raw, |item: Item| Fields::new().field("Name", item.name)).unwrap();
        let items = shaped.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], json!({ "Name": "a" }));
        assert!(items[1]["error"]
            .as_str()
            .unwrap()
            .contains("missing field `name`"));
        assert_eq!(items[2], json!({ "Name": "c" }));
    }

    #[test]
    fn list_payload_must_be_an_array() {
        let err = shape_list(&json!({}), |item: Item| Fields::new().field("Name", item.name))
            .unwrap_err();
        assert_eq!(err.to_string(), "expected a list");
    }

    #[test]
    fn boolean_labels() {
        assert_eq!(supported(true), "Supported");
        assert_eq!(supported(false), "Not Supported");
        assert_eq!(charging(false), "Not Charging");
        assert_eq!(yes_no(true), "Yes");
    }
}
