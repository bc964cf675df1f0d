//! Reading revoked serial numbers from the CA's revocation list.
//!
//! The CRL at `<ssl_dir>/ca/ca_crl.pem` is decoded fresh on every
//! query; nothing is cached. Only the revoked-entry serial numbers
//! are extracted; validity of the CRL signature is the CA's own
//! concern, not ours.

use std::collections::HashSet;
use std::path::Path;

use x509_parser::parse_x509_crl;
use x509_parser::pem::parse_x509_pem;

use crate::error::CaError;

/// Read and decode the CRL, returning the set of revoked serials.
///
/// An unreadable or undecodable file is a `MissingResource`: either
/// way the CA's revocation state is unavailable.
pub fn revoked_serials(path: &Path) -> Result<HashSet<u64>, CaError> {
    let raw = std::fs::read(path)
        .map_err(|e| CaError::missing(path, format!("cannot read CRL: {e}")))?;

    let (_, pem) = parse_x509_pem(&raw)
        .map_err(|e| CaError::missing(path, format!("CRL is not valid PEM: {e}")))?;
    let (_, crl) = parse_x509_crl(&pem.contents)
        .map_err(|e| CaError::missing(path, format!("CRL does not decode: {e}")))?;

    let mut serials = HashSet::new();
    for revoked in crl.iter_revoked_certificates() {
        match serial_to_u64(revoked.raw_serial()) {
            Some(serial) => {
                serials.insert(serial);
            }
            // Serials wider than 64 bits cannot match anything the
            // inventory parser produced, so membership tests are
            // unaffected by skipping them.
            None => tracing::debug!(
                serial = %revoked.raw_serial_as_string(),
                "Skipping CRL serial wider than 64 bits"
            ),
        }
    }
    Ok(serials)
}

fn serial_to_u64(raw: &[u8]) -> Option<u64> {
    let significant: Vec<u8> = raw.iter().copied().skip_while(|b| *b == 0).collect();
    if significant.len() > 8 {
        return None;
    }
    Some(significant.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

/// Build a real signed CRL in PEM form for tests.
#[cfg(test)]
pub(crate) fn test_crl_pem(serials: &[u64]) -> String {
    use rcgen::{
        BasicConstraints, CertificateParams, CertificateRevocationListParams, IsCa, KeyIdMethod,
        KeyPair, KeyUsagePurpose, RevokedCertParams, SerialNumber,
    };
    use time::{Duration, OffsetDateTime};

    let key = KeyPair::generate().unwrap();
    let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.key_usages = vec![KeyUsagePurpose::KeyCertSign, KeyUsagePurpose::CrlSign];
    let issuer = params.self_signed(&key).unwrap();

    let now = OffsetDateTime::now_utc();
    let crl = CertificateRevocationListParams {
        this_update: now,
        next_update: now + Duration::days(30),
        crl_number: SerialNumber::from(1u64),
        issuing_distribution_point: None,
        revoked_certs: serials
            .iter()
            .map(|serial| RevokedCertParams {
                serial_number: SerialNumber::from(*serial),
                revocation_time: now,
                reason_code: None,
                invalidity_date: None,
            })
            .collect(),
        key_identifier_method: KeyIdMethod::Sha256,
    }
    .signed_by(&issuer, &key)
    .unwrap();

    crl.pem().unwrap()
}
