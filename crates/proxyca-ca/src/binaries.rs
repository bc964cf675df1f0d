//! Locating the CA management and sudo binaries.
//!
//! Resolution happens once per facade instance and produces an
//! explicit [`ResolvedCa`] value that is handed to the command runner.
//! Nothing here is cached globally.

use std::path::PathBuf;

use proxyca_common::Settings;

use crate::error::CaError;

/// Legacy standalone CA binary (pre-2.6 Puppet).
const LEGACY_BINARY: &str = "puppetca";

/// Modern binary; CA operations go through its `cert` subcommand.
const MODERN_BINARY: &str = "puppet";

/// Built-in directories searched for the CA binary.
const CA_BINARY_DIRS: &[&str] = &["/usr/sbin", "/opt/puppet/bin"];

/// Built-in directories searched for sudo.
const SUDO_DIRS: &[&str] = &["/usr/bin"];

/// Which command-line dialect the resolved binary expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationStyle {
    /// `puppetca --sign <name>`, no extra token.
    Legacy,
    /// `puppet cert --sign <name>`: every invocation gets a leading
    /// `cert` argument.
    CertSubcommand,
}

/// The resolved external binaries for one facade instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCa {
    pub ca_binary: PathBuf,
    pub style: InvocationStyle,
    pub sudo: PathBuf,
}

/// Resolve the CA and sudo binaries for the given settings.
///
/// Checks the SSL/CA directory first: without a usable CA on disk the
/// binaries are moot. Configured override directories are searched
/// ahead of the built-in candidates; the legacy binary name wins over
/// the modern one wherever both exist.
pub fn resolve(settings: &Settings) -> Result<ResolvedCa, CaError> {
    let ca_dir = settings.ca_dir();
    if !ca_dir.is_dir() {
        tracing::warn!(path = %ca_dir.display(), "SSL/CA unavailable on this machine");
        return Err(CaError::missing(ca_dir, "SSL/CA directory does not exist"));
    }

    let search: Vec<PathBuf> = settings
        .binary_search_path
        .iter()
        .cloned()
        .chain(CA_BINARY_DIRS.iter().map(PathBuf::from))
        .collect();

    let (ca_binary, style) = if let Some(path) = find_in(&search, LEGACY_BINARY) {
        (path, InvocationStyle::Legacy)
    } else if let Some(path) = find_in(&search, MODERN_BINARY) {
        (path, InvocationStyle::CertSubcommand)
    } else {
        tracing::warn!("unable to find puppetca binary");
        return Err(CaError::missing(
            render_search(&search),
            "no puppetca or puppet binary on the search path",
        ));
    };
    tracing::debug!(path = %ca_binary.display(), ?style, "Found CA binary");

    let sudo_search: Vec<PathBuf> = settings
        .binary_search_path
        .iter()
        .cloned()
        .chain(SUDO_DIRS.iter().map(PathBuf::from))
        .collect();
    let sudo = find_in(&sudo_search, "sudo").ok_or_else(|| {
        tracing::warn!("unable to find sudo binary");
        CaError::missing(
            render_search(&sudo_search),
            "no sudo binary on the search path",
        )
    })?;
    tracing::debug!(path = %sudo.display(), "Found sudo");

    Ok(ResolvedCa {
        ca_binary,
        style,
        sudo,
    })
}

fn find_in(dirs: &[PathBuf], name: &str) -> Option<PathBuf> {
    dirs.iter()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

fn render_search(dirs: &[PathBuf]) -> PathBuf {
    let joined = dirs
        .iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(":");
    PathBuf::from(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proxyca_common::test::unique_temp_dir;
    use std::path::Path;

    fn settings_with(bin_dir: &Path, ssl_dir: &Path) -> Settings {
        Settings {
            ssl_dir: ssl_dir.to_path_buf(),
            puppet_dir: ssl_dir.to_path_buf(),
            binary_search_path: vec![bin_dir.to_path_buf()],
        }
    }

    fn touch(path: &Path) {
        std::fs::write(path, "#!/bin/sh\n").unwrap();
    }

    #[test]
    fn missing_ca_dir_fails_before_binary_search() {
        let dir = unique_temp_dir("proxyca-resolve-nossl");
        // No ca/ subdirectory created
        let settings = settings_with(&dir, &dir);
        let err = resolve(&settings).unwrap_err();
        assert!(matches!(err, CaError::MissingResource { .. }));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn legacy_binary_wins_and_selects_legacy_style() {
        let dir = unique_temp_dir("proxyca-resolve-legacy");
        std::fs::create_dir_all(dir.join("ssl/ca")).unwrap();
        touch(&dir.join("puppetca"));
        touch(&dir.join("puppet"));
        touch(&dir.join("sudo"));

        let resolved = resolve(&settings_with(&dir, &dir.join("ssl"))).unwrap();
        assert_eq!(resolved.ca_binary, dir.join("puppetca"));
        assert_eq!(resolved.style, InvocationStyle::Legacy);
        assert_eq!(resolved.sudo, dir.join("sudo"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn modern_binary_selects_cert_subcommand_style() {
        let dir = unique_temp_dir("proxyca-resolve-modern");
        std::fs::create_dir_all(dir.join("ssl/ca")).unwrap();
        touch(&dir.join("puppet"));
        touch(&dir.join("sudo"));

        let resolved = resolve(&settings_with(&dir, &dir.join("ssl"))).unwrap();
        assert_eq!(resolved.ca_binary, dir.join("puppet"));
        assert_eq!(resolved.style, InvocationStyle::CertSubcommand);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn no_ca_binary_anywhere_is_missing_resource() {
        let dir = unique_temp_dir("proxyca-resolve-nobin");
        std::fs::create_dir_all(dir.join("ssl/ca")).unwrap();
        touch(&dir.join("sudo"));

        let err = resolve(&settings_with(&dir, &dir.join("ssl"))).unwrap_err();
        match err {
            CaError::MissingResource { detail, .. } => {
                assert!(detail.contains("puppetca"));
            }
            other => panic!("expected MissingResource, got {other:?}"),
        }
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn override_dir_beats_builtin_candidates() {
        let dir = unique_temp_dir("proxyca-resolve-override");
        std::fs::create_dir_all(dir.join("ssl/ca")).unwrap();
        touch(&dir.join("puppetca"));
        touch(&dir.join("sudo"));

        let resolved = resolve(&settings_with(&dir, &dir.join("ssl"))).unwrap();
        // The override directory appears first in the search order, so
        // the binary must come from there even on hosts that also have
        // a system-wide installation.
        assert!(resolved.ca_binary.starts_with(&dir));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
