//! The autosign allow-list store.
//!
//! `autosign.conf` is a plain text file, one common name per line, in
//! insertion order with no duplicates. An absent file reads as an
//! empty list. Every rewrite goes through a temp file and an atomic
//! rename so a crash mid-write cannot leave a half-written line.
//!
//! No locking: callers serialize concurrent mutations externally.

use std::path::{Path, PathBuf};

use crate::error::CaError;

/// File-backed allow-list of common names eligible for autosigning.
#[derive(Debug, Clone)]
pub struct AutosignStore {
    path: PathBuf,
}

impl AutosignStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The allow-listed names, in file order. Empty if the file is
    /// absent.
    pub fn list(&self) -> Result<Vec<String>, CaError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(raw
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Add a name to the allow-list. A no-op if the exact name is
    /// already present; creates the file if absent.
    pub fn add(&self, certname: &str) -> Result<(), CaError> {
        let mut entries = self.list()?;
        if entries.iter().any(|entry| entry == certname) {
            tracing::debug!(certname, "Already in autosign allow-list");
            return Ok(());
        }
        entries.push(certname.to_string());
        self.write_entries(&entries)?;
        tracing::info!(certname, "Added to autosign allow-list");
        Ok(())
    }

    /// Remove every line equal to `certname`, collapsing any
    /// duplicates among the remaining lines. Fails with `NotPresent`
    /// if the name is absent; an absent file holds no names, so it
    /// reports the same way.
    pub fn remove(&self, certname: &str) -> Result<(), CaError> {
        let entries = self.list()?;
        let mut kept: Vec<String> = Vec::with_capacity(entries.len());
        let mut found = false;
        for entry in entries {
            if entry == certname {
                found = true;
            } else if !kept.contains(&entry) {
                kept.push(entry);
            }
        }

        if !found {
            tracing::info!(certname, "Attempt to remove nonexistent autosign entry");
            return Err(CaError::NotPresent(certname.to_string()));
        }

        self.write_entries(&kept)?;
        tracing::info!(certname, "Removed from autosign allow-list");
        Ok(())
    }

    fn write_entries(&self, entries: &[String]) -> Result<(), CaError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut content = entries.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        let tmp = self.path.with_extension("conf.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
