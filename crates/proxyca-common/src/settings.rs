//! Proxy configuration.
//!
//! Settings are read once from a TOML file (or built from defaults)
//! and passed by value into the CA facade. Every field is optional in
//! the file; absent fields fall back to the stock Puppet locations.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::paths;

/// Externally supplied configuration for the CA proxy.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Puppet SSL directory (`/var/lib/puppet/ssl` unless overridden).
    #[serde(default = "default_ssl_dir")]
    pub ssl_dir: PathBuf,

    /// Puppet configuration directory (`/etc/puppet` unless overridden).
    #[serde(default = "default_puppet_dir")]
    pub puppet_dir: PathBuf,

    /// Extra directories searched for the CA and sudo binaries,
    /// ahead of the built-in candidates.
    #[serde(default)]
    pub binary_search_path: Vec<PathBuf>,
}

fn default_ssl_dir() -> PathBuf {
    PathBuf::from(paths::DEFAULT_SSL_DIR)
}

fn default_puppet_dir() -> PathBuf {
    PathBuf::from(paths::DEFAULT_PUPPET_DIR)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ssl_dir: default_ssl_dir(),
            puppet_dir: default_puppet_dir(),
            binary_search_path: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, io::Error> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// The CA state directory (`<ssl_dir>/ca`).
    pub fn ca_dir(&self) -> PathBuf {
        paths::ca_dir(&self.ssl_dir)
    }

    /// The CA's serial-number ledger (`<ssl_dir>/ca/inventory.txt`).
    pub fn inventory_file(&self) -> PathBuf {
        paths::inventory_file(&self.ssl_dir)
    }

    /// The CA's revocation list (`<ssl_dir>/ca/ca_crl.pem`).
    pub fn crl_file(&self) -> PathBuf {
        paths::crl_file(&self.ssl_dir)
    }

    /// The autosign allow-list (`<puppet_dir>/autosign.conf`).
    pub fn autosign_file(&self) -> PathBuf {
        paths::autosign_file(&self.puppet_dir)
    }
}
