//! Vendor and device names from the system `pci.ids` database.

use std::path::Path;

const DATABASES: [&str; 3] = [
    "usr/share/hwdata/pci.ids",
    "usr/share/misc/pci.ids",
    "usr/share/pci.ids",
];

/// Used when no database is installed.
const KNOWN_VENDORS: [(u32, &str); 8] = [
    (0x1002, "Advanced Micro Devices, Inc. [AMD/ATI]"),
    (0x10de, "NVIDIA Corporation"),
    (0x8086, "Intel Corporation"),
    (0x106b, "Apple Inc."),
    (0x1414, "Microsoft Corporation"),
    (0x15ad, "VMware"),
    (0x1af4, "Red Hat, Inc."),
    (0x1234, "Technical Corp."),
];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct PciNames {
    pub vendor: Option<String>,
    pub device: Option<String>,
    pub sub_vendor: Option<String>,
}

pub(crate) fn load(root: &Path) -> Option<String> {
    DATABASES
        .iter()
        .find_map(|db| std::fs::read_to_string(root.join(db)).ok())
}

fn parse_entry(line: &str) -> Option<(u32, &str)> {
    let (id, name) = line.split_once(char::is_whitespace)?;
    let id = u32::from_str_radix(id, 16).ok()?;
    Some((id, name.trim()))
}

pub(crate) fn lookup(
    db: Option<&str>,
    vendor: u32,
    device: u32,
    sub_vendor: Option<u32>,
) -> PciNames {
    let mut names = PciNames::default();

    if let Some(db) = db {
        let mut in_vendor = false;
        for line in db.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            // device classes follow the vendor list
            if line.starts_with("C ") {
                break;
            }
            if let Some(rest) = line.strip_prefix('\t') {
                if in_vendor && !rest.starts_with('\t') {
                    if let Some((id, name)) = parse_entry(rest) {
                        if id == device {
                            names.device = Some(name.to_string());
                        }
                    }
                }
                continue;
            }
            let Some((id, name)) = parse_entry(line) else {
                continue;
            };
            in_vendor = id == vendor;
            if in_vendor {
                names.vendor = Some(name.to_string());
            }
            if Some(id) == sub_vendor {
                names.sub_vendor = Some(name.to_string());
            }
        }
    }

    let known = |id: u32| {
        KNOWN_VENDORS
            .iter()
            .find(|(known, _)| *known == id)
            .map(|(_, name)| name.to_string())
    };
    names.vendor = names.vendor.or_else(|| known(vendor));
    names.sub_vendor = names.sub_vendor.or_else(|| sub_vendor.and_then(known));
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    const DB: &str = "\
# comment
1028  Dell
10de  NVIDIA Corporation
\t2684  AD102 [GeForce RTX 4090]
\t\t10de 167c  GeForce RTX 4090 Founders Edition
\t2782  AD104 [GeForce RTX 4070 Ti]
8086  Intel Corporation
\t46a6  Alder Lake-P GT2 [Iris Xe Graphics]
C 03  Display controller
";

    #[test]
    fn resolves_vendor_device_and_subvendor() {
        let names = lookup(Some(DB), 0x10de, 0x2684, Some(0x1028));
        assert_eq!(names.vendor.as_deref(), Some("NVIDIA Corporation"));
        assert_eq!(names.device.as_deref(), Some("AD102 [GeForce RTX 4090]"));
        assert_eq!(names.sub_vendor.as_deref(), Some("Dell"));
    }

    #[test]
    fn device_ids_are_scoped_to_their_vendor() {
        let names = lookup(Some(DB), 0x8086, 0x2684, None);
        assert_eq!(names.vendor.as_deref(), Some("Intel Corporation"));
        assert_eq!(names.device, None);
    }

    #[test]
    fn falls_back_without_database() {
        let names = lookup(None, 0x1002, 0x73bf, Some(0x9999));
        assert_eq!(
            names.vendor.as_deref(),
            Some("Advanced Micro Devices, Inc. [AMD/ATI]")
        );
        assert_eq!(names.device, None);
        assert_eq!(names.sub_vendor, None);
    }
}
