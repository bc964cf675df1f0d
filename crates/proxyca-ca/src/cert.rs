//! Certificate data model.
//!
//! A [`CertificateRecord`] is the merged view of one certificate,
//! keyed externally by common name. Each data source populates a
//! subset of the fields: the CLI listing contributes `state` and
//! `fingerprint`, the inventory file contributes `serial` and the
//! validity window. A record fresh from the inventory has no state
//! until the revocation list or the CLI listing assigns one.

use serde::Serialize;

/// Lifecycle state of a certificate as reported by the CA.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CertState {
    /// Request received but not yet signed or rejected.
    Pending,
    /// Signed and not revoked.
    Valid,
    /// Revoked before expiry.
    Revoked,
}

/// Per-certificate record, merged best-effort from all sources.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CertificateRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<CertState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    /// Serial number decoded from the inventory's hex form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<u64>,
    /// Validity window bounds, kept as the inventory's own opaque
    /// timestamp strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_after: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&CertState::Pending).unwrap(), r#""pending""#);
        assert_eq!(serde_json::to_string(&CertState::Valid).unwrap(), r#""valid""#);
        assert_eq!(serde_json::to_string(&CertState::Revoked).unwrap(), r#""revoked""#);
    }

    #[test]
    fn unset_fields_skip_serialization() {
        let record = CertificateRecord {
            state: Some(CertState::Valid),
            fingerprint: Some("SHA256 ab:cd".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("valid"));
        assert!(!json.contains("serial"));
        assert!(!json.contains("not_before"));
        assert!(!json.contains("not_after"));
    }
}
