//! Small helpers for reading sysfs / procfs attribute files.

use crate::error::ProbeError;
use std::fs;
use std::path::{Path, PathBuf};

/// Firmware placeholder strings that carry no information.
const PLACEHOLDERS: [&str; 8] = [
    "to be filled by o.e.m.",
    "default string",
    "not specified",
    "not applicable",
    "system product name",
    "system manufacturer",
    "none",
    "0x00000000",
];

/// Reads a text attribute, trimmed. Missing, unreadable or blank files are `None`.
pub(crate) fn read_text(path: impl AsRef<Path>) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

/// Like [`read_text`] but also drops firmware placeholder values.
pub(crate) fn read_dmi(path: impl AsRef<Path>) -> Option<String> {
    read_text(path).filter(|value| !PLACEHOLDERS.contains(&value.to_lowercase().as_str()))
}

pub(crate) fn read_u64(path: impl AsRef<Path>) -> Option<u64> {
    read_text(path)?.parse().ok()
}

/// Parses a `0x`-prefixed hex attribute such as a PCI vendor id.
pub(crate) fn read_hex(path: impl AsRef<Path>) -> Option<u32> {
    let raw = read_text(path)?;
    u32::from_str_radix(raw.trim_start_matches("0x"), 16).ok()
}

/// Name of the directory a symlink such as `device/driver` points to.
pub(crate) fn link_name(path: impl AsRef<Path>) -> Option<String> {
    let target = fs::read_link(path).ok()?;
    target.file_name()?.to_str().map(str::to_string)
}

pub(crate) fn require_dir(path: &Path, what: &str) -> Result<(), ProbeError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ProbeError::Unavailable(what.to_string()))
    }
}

/// Directory entries sorted by name, so results are stable across calls.
pub(crate) fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, ProbeError> {
    let read = fs::read_dir(dir).map_err(|source| ProbeError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut entries: Vec<PathBuf> = read.filter_map(|e| e.ok()).map(|e| e.path()).collect();
    entries.sort();
    Ok(entries)
}

pub(crate) fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}

/// Expands a kernel cpulist such as `0-3,8,10-11` into CPU indices.
pub(crate) fn parse_cpu_list(raw: &str) -> Option<Vec<usize>> {
    let mut cpus = Vec::new();
    for range in raw.trim().split(',').filter(|r| !r.is_empty()) {
        let mut parts = range.split('-');
        let first: usize = parts.next()?.trim().parse().ok()?;
        let last: usize = match parts.next() {
            Some(last) => last.trim().parse().ok()?,
            None => first,
        };
        if last < first || parts.next().is_some() {
            return None;
        }
        cpus.extend(first..=last);
    }
    Some(cpus)
}
