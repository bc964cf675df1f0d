//! Parsing of the CA binary's `--list --all` output.
//!
//! One certificate per line, in one of two forms:
//!
//! ```text
//! + host1.example.com (SHA256 ab:cd)
//! - host2.example.com (SHA256 ef:01)
//!   host3.example.com (SHA256 22:33)
//! ```
//!
//! A `+` prefix means signed, `-` means revoked, no prefix means the
//! request is still pending.
//!
//! A line matching neither form is skipped with a warning; one bad
//! line never fails the overall listing.

use std::collections::BTreeMap;

use crate::cert::{CertState, CertificateRecord};

/// Parse the combined listing output into records keyed by common name.
pub fn parse_listing(output: &str) -> BTreeMap<String, CertificateRecord> {
    let mut records = BTreeMap::new();
    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some((name, record)) => {
                records.insert(name, record);
            }
            None => tracing::warn!(line, "Failed to parse certificate listing line"),
        }
    }
    records
}

/// Parse a single listing line. The fingerprint is everything inside
/// the trailing parentheses and may itself contain spaces.
fn parse_line(line: &str) -> Option<(String, CertificateRecord)> {
    let line = line.trim();
    if !line.ends_with(')') {
        return None;
    }
    let open = line.rfind('(')?;
    let fingerprint = line[open + 1..line.len() - 1].trim();

    let head = line[..open].trim_end();
    let (state, name) = if let Some(rest) = head.strip_prefix('+') {
        (CertState::Valid, rest.trim())
    } else if let Some(rest) = head.strip_prefix('-') {
        (CertState::Revoked, rest.trim())
    } else {
        (CertState::Pending, head)
    };

    if name.is_empty() || fingerprint.is_empty() {
        return None;
    }

    Some((
        name.to_string(),
        CertificateRecord {
            state: Some(state),
            fingerprint: Some(fingerprint.to_string()),
            ..Default::default()
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_prefix_is_valid() {
        let (name, record) = parse_line("+ host1.example.com (SHA256 ab:cd)").unwrap();
        assert_eq!(name, "host1.example.com");
        assert_eq!(record.state, Some(CertState::Valid));
        assert_eq!(record.fingerprint.as_deref(), Some("SHA256 ab:cd"));
    }

    #[test]
    fn minus_prefix_is_revoked() {
        let (name, record) = parse_line("- host2.example.com (SHA256 ef:01)").unwrap();
        assert_eq!(name, "host2.example.com");
        assert_eq!(record.state, Some(CertState::Revoked));
        assert_eq!(record.fingerprint.as_deref(), Some("SHA256 ef:01"));
    }

    #[test]
    fn no_prefix_is_pending() {
        let (name, record) = parse_line("host3.example.com (SHA256 22:33)").unwrap();
        assert_eq!(name, "host3.example.com");
        assert_eq!(record.state, Some(CertState::Pending));
        assert_eq!(record.fingerprint.as_deref(), Some("SHA256 22:33"));
    }

    #[test]
    fn garbage_line_is_skipped() {
        assert!(parse_line("garbage text").is_none());
        assert!(parse_line("").is_none());
        assert!(parse_line("()").is_none());
        assert!(parse_line("+ (SHA256 ab:cd)").is_none());
    }

    #[test]
    fn listing_keeps_good_lines_and_drops_bad_ones() {
        let output = "\
+ host1.example.com (SHA256 ab:cd)
garbage text
host3.example.com (SHA256 22:33)
";
        let records = parse_listing(output);
        assert_eq!(records.len(), 2);
        assert_eq!(
            records["host1.example.com"].state,
            Some(CertState::Valid)
        );
        assert_eq!(
            records["host3.example.com"].state,
            Some(CertState::Pending)
        );
    }

    #[test]
    fn leading_whitespace_is_tolerated() {
        let (name, record) = parse_line("  host.example.com  (SHA1 aa:bb)").unwrap();
        assert_eq!(name, "host.example.com");
        assert_eq!(record.state, Some(CertState::Pending));
    }

    #[test]
    fn listing_never_populates_inventory_fields() {
        let records = parse_listing("+ host1.example.com (SHA256 ab:cd)\n");
        let record = &records["host1.example.com"];
        assert!(record.serial.is_none());
        assert!(record.not_before.is_none());
        assert!(record.not_after.is_none());
    }
}
