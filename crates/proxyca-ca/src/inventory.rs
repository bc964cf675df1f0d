//! Parsing of the CA's `inventory.txt` serial-number ledger.
//!
//! One certificate per line:
//!
//! ```text
//! 0x005a 2011-04-16T07:12:46GMT 2016-04-14T07:12:46GMT /CN=host.example.com
//! ```
//!
//! The inventory is written by the CA itself and assumed well-formed;
//! lines that do not match the grammar are ignored without a warning,
//! unlike CLI output.

use std::collections::BTreeMap;
use std::path::Path;

use crate::cert::CertificateRecord;
use crate::error::CaError;

/// Read and parse the inventory file into records keyed by common
/// name. The records carry `serial` and the validity window; `state`
/// stays unset until the merge step.
pub fn parse_inventory_file(path: &Path) -> Result<BTreeMap<String, CertificateRecord>, CaError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| CaError::missing(path, format!("cannot read CA inventory: {e}")))?;
    Ok(parse_inventory(&raw))
}

/// Parse inventory text. Split out from the file read for tests.
pub fn parse_inventory(raw: &str) -> BTreeMap<String, CertificateRecord> {
    let mut records = BTreeMap::new();
    for line in raw.lines() {
        if let Some((name, record)) = parse_line(line) {
            records.insert(name, record);
        }
    }
    records
}

fn parse_line(line: &str) -> Option<(String, CertificateRecord)> {
    let mut fields = line.split_whitespace();
    let serial = fields.next()?;
    let not_before = fields.next()?;
    let not_after = fields.next()?;
    let subject = fields.next()?;

    let hex = serial
        .strip_prefix("0x")
        .or_else(|| serial.strip_prefix("0X"))?;
    let serial = u64::from_str_radix(hex, 16).ok()?;

    // Timestamps in the ledger always start with a digit; anything
    // else is a header or stray line.
    if !starts_with_digit(not_before) || !starts_with_digit(not_after) {
        return None;
    }

    let name = subject.strip_prefix("/CN=")?;
    if name.is_empty() {
        return None;
    }

    Some((
        name.to_string(),
        CertificateRecord {
            serial: Some(serial),
            not_before: Some(not_before.to_string()),
            not_after: Some(not_after.to_string()),
            ..Default::default()
        },
    ))
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}
