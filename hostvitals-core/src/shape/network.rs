use super::{decode, Fields, NOT_AVAILABLE};
use crate::error::ShapeError;
use crate::models::NetworkInterface;
use crate::registry::{RawPayload, Shaped};
use crate::report::failure_marker;
use serde_json::Value;

fn usable(address: &Option<String>) -> Option<&str> {
    address.as_deref().map(str::trim).filter(|a| !a.is_empty())
}

/// Picks the first external interface with an IPv4 address and, separately,
/// the first with an IPv6 address. The two may come from different interfaces.
pub fn shape_network(raw: &RawPayload) -> Result<Shaped, ShapeError> {
    let items = raw
        .as_array()
        .ok_or_else(|| ShapeError::new("expected a list of interfaces"))?;
    let decoded: Vec<Result<NetworkInterface, ShapeError>> = items.iter().map(decode).collect();

    let external = || {
        decoded
            .iter()
            .filter_map(|nic| nic.as_ref().ok())
            .filter(|nic| !nic.internal)
    };
    let ipv4 = external().find_map(|nic| usable(&nic.ip4)).unwrap_or(NOT_AVAILABLE);
    let ipv6 = external().find_map(|nic| usable(&nic.ip6)).unwrap_or(NOT_AVAILABLE);

    let interfaces: Vec<Value> = decoded
        .iter()
        .map(|nic| match nic {
            Ok(nic) => Fields::new()
                .field("Name", nic.name.as_str())
                .optional("IPv4", usable(&nic.ip4))
                .optional("IPv6", usable(&nic.ip6))
                .into(),
            Err(err) => failure_marker(&format!("shape error: {err}")),
        })
        .collect();

    Ok(Fields::new()
        .field("IPv4", ipv4)
        .field("IPv6", ipv6)
        .field("Interfaces", interfaces)
        .into())
}
