//! Default Puppet directory locations.
//!
//! The proxy works against an existing Puppet installation, so these
//! are the stock distribution paths. Deployments with relocated
//! directories override them through [`crate::Settings`].

use std::path::{Path, PathBuf};

/// Puppet SSL directory; the CA's own state lives under `<ssl_dir>/ca`.
pub const DEFAULT_SSL_DIR: &str = "/var/lib/puppet/ssl";

/// Puppet configuration directory, holding `autosign.conf`.
pub const DEFAULT_PUPPET_DIR: &str = "/etc/puppet";

/// The CA state directory under an SSL directory.
pub fn ca_dir(ssl_dir: &Path) -> PathBuf {
    ssl_dir.join("ca")
}

/// The CA's serial-number ledger.
pub fn inventory_file(ssl_dir: &Path) -> PathBuf {
    ca_dir(ssl_dir).join("inventory.txt")
}

/// The CA's certificate revocation list.
pub fn crl_file(ssl_dir: &Path) -> PathBuf {
    ca_dir(ssl_dir).join("ca_crl.pem")
}

/// The autosign allow-list file.
pub fn autosign_file(puppet_dir: &Path) -> PathBuf {
    puppet_dir.join("autosign.conf")
}
