//! Puppet CA state reconciliation and lifecycle operations.
//!
//! Reconciles the authoritative state of the CA's certificates from
//! three partially-overlapping sources (the live `--list --all`
//! output of the CA binary, the on-disk `inventory.txt` ledger, and
//! the `ca_crl.pem` revocation list) and exposes sign, clean, and
//! autosign allow-list operations on top. The CA binary itself is the
//! value-bearing dependency; it is invoked through `sudo`, never
//! reimplemented.
//!
//! Everything is synchronous and single-threaded: each operation
//! blocks until the subprocess or file I/O completes, with no timeout
//! (a hung CA binary hangs the caller). Mutating operations on the
//! same certificate name must be serialized by the caller; reads may
//! run concurrently but can observe a torn view across an interleaved
//! autosign mutation.

pub mod autosign;
pub mod binaries;
pub mod cert;
pub mod crl;
pub mod error;
pub mod inventory;
pub mod listing;
pub mod merge;
pub mod runner;

use std::collections::BTreeMap;

use proxyca_common::Settings;

pub use autosign::AutosignStore;
pub use binaries::{InvocationStyle, ResolvedCa};
pub use cert::{CertState, CertificateRecord};
pub use error::CaError;
pub use runner::{CommandOutput, CommandRunner, SudoRunner};

/// Phrase in the CA binary's output that distinguishes "no such
/// certificate" from a genuine failure.
const NOT_PRESENT_MARKER: &str = "Could not find client certificate";

/// The CA operation surface.
///
/// Built over a [`CommandRunner`] so tests can substitute a fake for
/// the external binary; production callers use [`PuppetCa::resolve`],
/// which locates the binaries once for the lifetime of the facade.
pub struct PuppetCa<R: CommandRunner> {
    settings: Settings,
    runner: R,
}

impl PuppetCa<SudoRunner> {
    /// Resolve the CA and sudo binaries and build the facade.
    pub fn resolve(settings: Settings) -> Result<Self, CaError> {
        let resolved = binaries::resolve(&settings)?;
        Ok(Self {
            runner: SudoRunner::new(resolved),
            settings,
        })
    }
}

impl<R: CommandRunner> PuppetCa<R> {
    /// Build the facade over an explicit runner.
    pub fn with_runner(settings: Settings, runner: R) -> Self {
        Self { settings, runner }
    }

    /// Sign the pending request for `certname`.
    pub fn sign(&self, certname: &str) -> Result<(), CaError> {
        let certname = certname.to_lowercase();
        self.ca_command("--sign", &certname)?;
        tracing::info!(%certname, "Signed puppet certificate");
        Ok(())
    }

    /// Revoke and remove the certificate for `certname`.
    pub fn clean(&self, certname: &str) -> Result<(), CaError> {
        let certname = certname.to_lowercase();
        self.ca_command("--clean", &certname)?;
        tracing::info!(%certname, "Cleaned puppet certificate");
        Ok(())
    }

    /// The merged state of every certificate the CA knows about,
    /// keyed by common name. Built fresh on every call.
    pub fn list(&self) -> Result<BTreeMap<String, CertificateRecord>, CaError> {
        let out = self.runner.run(&["--list", "--all"])?;
        if !out.success {
            tracing::warn!(output = %out.combined, "CA listing command failed");
            return Err(CaError::CommandFailure {
                command: out.command,
                output: out.combined,
            });
        }

        let cli = listing::parse_listing(&out.combined);
        let ledger = inventory::parse_inventory_file(&self.settings.inventory_file())?;
        let revoked = crl::revoked_serials(&self.settings.crl_file())?;
        Ok(merge::merge(cli, ledger, &revoked))
    }

    /// The pending subset of [`PuppetCa::list`].
    pub fn pending(&self) -> Result<BTreeMap<String, CertificateRecord>, CaError> {
        Ok(merge::pending_only(self.list()?))
    }

    /// Allow `certname` to be signed automatically. Idempotent.
    pub fn autosign(&self, certname: &str) -> Result<(), CaError> {
        self.autosign_store().add(certname)
    }

    /// Withdraw `certname` from the autosign allow-list.
    pub fn disable_autosign(&self, certname: &str) -> Result<(), CaError> {
        self.autosign_store().remove(certname)
    }

    /// The current autosign allow-list, in file order.
    pub fn autosign_list(&self) -> Result<Vec<String>, CaError> {
        self.autosign_store().list()
    }

    fn autosign_store(&self) -> AutosignStore {
        AutosignStore::new(self.settings.autosign_file())
    }

    fn ca_command(&self, flag: &str, certname: &str) -> Result<(), CaError> {
        let out = self.runner.run(&[flag, certname])?;
        if out.success {
            return Ok(());
        }
        // Later CA versions exit zero for absent certificates; older
        // ones report it in the output, which callers treat as a
        // distinct non-fatal outcome.
        if out.combined.contains(NOT_PRESENT_MARKER) {
            tracing::info!(certname, "No such client certificate");
            return Err(CaError::NotPresent(certname.to_string()));
        }
        tracing::warn!(output = %out.combined, "CA command failed");
        Err(CaError::CommandFailure {
            command: out.command,
            output: out.combined,
        })
    }
}
