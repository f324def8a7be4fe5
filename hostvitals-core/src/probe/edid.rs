//! Minimal EDID 1.x decoding: manufacturer, monitor name and preferred mode.

const HEADER: [u8; 8] = [0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00];
const DESCRIPTORS: [usize; 4] = [54, 72, 90, 108];
const MONITOR_NAME: u8 = 0xfc;

const PNP_VENDORS: [(&str, &str); 18] = [
    ("ACR", "Acer"),
    ("AOC", "AOC"),
    ("APP", "Apple"),
    ("AUO", "AU Optronics"),
    ("AUS", "ASUS"),
    ("BNQ", "BenQ"),
    ("BOE", "BOE"),
    ("CMN", "Chimei Innolux"),
    ("DEL", "Dell"),
    ("GSM", "LG Electronics"),
    ("HWP", "HP"),
    ("LEN", "Lenovo"),
    ("LGD", "LG Display"),
    ("MSI", "MSI"),
    ("PHL", "Philips"),
    ("SAM", "Samsung"),
    ("SHP", "Sharp"),
    ("VSC", "ViewSonic"),
];

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Edid {
    pub vendor: Option<String>,
    pub model: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub refresh_rate: Option<f64>,
}

pub(crate) fn parse(bytes: &[u8]) -> Option<Edid> {
    if bytes.len() < 128 || bytes[..8] != HEADER {
        return None;
    }

    let mut edid = Edid {
        vendor: Some(vendor_name(manufacturer_id(bytes[8], bytes[9]))),
        ..Edid::default()
    };

    for &offset in &DESCRIPTORS {
        let block = &bytes[offset..offset + 18];
        let pixel_clock = u16::from_le_bytes([block[0], block[1]]);
        if pixel_clock != 0 {
            // only the first detailed timing is the preferred mode
            if edid.width.is_none() {
                apply_timing(&mut edid, block, pixel_clock);
            }
        } else if block[3] == MONITOR_NAME {
            let name: String = block[5..18]
                .iter()
                .take_while(|b| **b != b'\n')
                .map(|b| char::from(*b))
                .collect();
            let name = name.trim();
            if !name.is_empty() {
                edid.model = Some(name.to_string());
            }
        }
    }

    if edid.model.is_none() {
        let product = u16::from_le_bytes([bytes[10], bytes[11]]);
        edid.model = Some(format!("{product:04X}"));
    }
    Some(edid)
}

fn apply_timing(edid: &mut Edid, block: &[u8], pixel_clock: u16) {
    let h_active = u32::from(block[2]) | (u32::from(block[4] & 0xf0) << 4);
    let h_blank = u32::from(block[3]) | (u32::from(block[4] & 0x0f) << 8);
    let v_active = u32::from(block[5]) | (u32::from(block[7] & 0xf0) << 4);
    let v_blank = u32::from(block[6]) | (u32::from(block[7] & 0x0f) << 8);

    edid.width = Some(h_active);
    edid.height = Some(v_active);

    let total = f64::from((h_active + h_blank) * (v_active + v_blank));
    if total > 0.0 {
        let hz = f64::from(pixel_clock) * 10_000.0 / total;
        edid.refresh_rate = Some((hz * 100.0).round() / 100.0);
    }
}

/// Three 5-bit letters packed big-endian, 'A' = 1.
fn manufacturer_id(high: u8, low: u8) -> String {
    let packed = u16::from_be_bytes([high, low]);
    [10u16, 5, 0]
        .iter()
        .map(|shift| char::from(b'A' - 1 + ((packed >> shift) & 0x1f) as u8))
        .collect()
}

fn vendor_name(code: String) -> String {
    PNP_VENDORS
        .iter()
        .find(|(pnp, _)| *pnp == code)
        .map(|(_, name)| name.to_string())
        .unwrap_or(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1920x1080@60 (148.5 MHz, 2200x1125 total) from "DEL", named "DELL U2419H".
    fn sample() -> Vec<u8> {
        let mut edid = vec![0u8; 128];
        edid[..8].copy_from_slice(&HEADER);
        edid[8] = 0x10;
        edid[9] = 0xac;
        edid[10] = 0x7a;
        edid[11] = 0xa0;

        let timing = &mut edid[54..72];
        timing[0..2].copy_from_slice(&14_850u16.to_le_bytes());
        timing[2] = 0x80; // 1920 & 0xff
        timing[3] = 0x18; // 280 & 0xff
        timing[4] = 0x71; // 1920 >> 8 = 7, 280 >> 8 = 1
        timing[5] = 0x38; // 1080 & 0xff
        timing[6] = 0x2d; // 45
        timing[7] = 0x40; // 1080 >> 8 = 4

        let name = &mut edid[72..90];
        name[3] = MONITOR_NAME;
        name[5..18].copy_from_slice(b"DELL U2419H\n ");
        edid
    }

    #[test]
    fn decodes_vendor_name_and_preferred_mode() {
        let edid = parse(&sample()).unwrap();
        assert_eq!(edid.vendor.as_deref(), Some("Dell"));
        assert_eq!(edid.model.as_deref(), Some("DELL U2419H"));
        assert_eq!(edid.width, Some(1920));
        assert_eq!(edid.height, Some(1080));
        assert_eq!(edid.refresh_rate, Some(60.0));
    }

    #[test]
    fn rejects_bad_header() {
        let mut bytes = sample();
        bytes[0] = 0x12;
        assert!(parse(&bytes).is_none());
        assert!(parse(&bytes[..64]).is_none());
    }

    #[test]
    fn unknown_vendor_keeps_pnp_code() {
        assert_eq!(manufacturer_id(0x10, 0xac), "DEL");
        assert_eq!(vendor_name("XYZ".into()), "XYZ");
    }
}
