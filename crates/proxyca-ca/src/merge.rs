//! Merging the three certificate data sources into one view.
//!
//! The inventory ledger is the base; the revocation list marks its
//! entries; the live CLI listing overlays the result. A pending CLI
//! record replaces its inventory counterpart wholesale: a mid-request
//! certificate has never been assigned a serial, so inventory data
//! under the same name belongs to an earlier issuance.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

use crate::cert::{CertState, CertificateRecord};

/// Combine CLI, inventory, and CRL data, keyed by common name.
///
/// Where CLI and inventory disagree on state, the CLI value wins.
/// This keeps only the last revocation state for certificates revoked
/// multiple times, a known lossy simplification.
pub fn merge(
    cli: BTreeMap<String, CertificateRecord>,
    mut inventory: BTreeMap<String, CertificateRecord>,
    revoked: &HashSet<u64>,
) -> BTreeMap<String, CertificateRecord> {
    for record in inventory.values_mut() {
        if record.serial.is_some_and(|serial| revoked.contains(&serial)) {
            record.state = Some(CertState::Revoked);
        }
    }

    for (name, cli_record) in cli {
        match inventory.entry(name) {
            Entry::Occupied(mut entry) => {
                if cli_record.state == Some(CertState::Pending) {
                    *entry.get_mut() = cli_record;
                } else {
                    let merged = entry.get_mut();
                    merged.state = cli_record.state.or(merged.state);
                    merged.fingerprint = cli_record.fingerprint.or(merged.fingerprint.take());
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(cli_record);
            }
        }
    }

    inventory
}

/// Filter a merged view down to pending requests.
pub fn pending_only(
    merged: BTreeMap<String, CertificateRecord>,
) -> BTreeMap<String, CertificateRecord> {
    merged
        .into_iter()
        .filter(|(_, record)| record.state == Some(CertState::Pending))
        .collect()
}
