//! Shared plumbing for the proxyca workspace.
//!
//! Holds the pieces more than one crate (or more than one test suite)
//! needs: default Puppet directory locations, the settings structure
//! read from the proxy's configuration file, and temp-dir helpers for
//! tests that touch the filesystem.

pub mod paths;
pub mod settings;

pub use settings::Settings;
