//! Synchronous execution of the external CA command.
//!
//! The runner captures stdout and stderr interleaved into one text
//! blob and reports the exit status verbatim. A nonzero exit is a
//! normal outcome here; only failure to spawn the process is an
//! error. Callers classify the output (see the facade).
//!
//! No timeout is applied: a hung CA binary hangs the caller. That
//! matches the upstream proxy behavior and is documented on the
//! facade.

use std::process::Command;

use crate::binaries::{InvocationStyle, ResolvedCa};
use crate::error::CaError;

/// Outcome of one external command invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit status, verbatim.
    pub success: bool,
    /// Stdout and stderr, interleaved.
    pub combined: String,
    /// The invoked command line, rendered for logs and errors.
    pub command: String,
}

/// Seam for executing CA subcommands, so tests can substitute a fake.
pub trait CommandRunner {
    fn run(&self, args: &[&str]) -> Result<CommandOutput, CaError>;
}

/// Runs the resolved CA binary through `sudo -S`.
#[derive(Debug, Clone)]
pub struct SudoRunner {
    resolved: ResolvedCa,
}

impl SudoRunner {
    pub fn new(resolved: ResolvedCa) -> Self {
        Self { resolved }
    }

    fn render(&self, args: &[&str]) -> String {
        let mut parts = vec![
            self.resolved.sudo.display().to_string(),
            "-S".to_string(),
            self.resolved.ca_binary.display().to_string(),
        ];
        if self.resolved.style == InvocationStyle::CertSubcommand {
            parts.push("cert".to_string());
        }
        parts.extend(args.iter().map(|a| a.to_string()));
        parts.join(" ")
    }
}

impl CommandRunner for SudoRunner {
    fn run(&self, args: &[&str]) -> Result<CommandOutput, CaError> {
        let command = self.render(args);
        tracing::debug!(%command, "Executing CA command");

        let mut cmd = Command::new(&self.resolved.sudo);
        cmd.arg("-S").arg(&self.resolved.ca_binary);
        if self.resolved.style == InvocationStyle::CertSubcommand {
            cmd.arg("cert");
        }
        cmd.args(args);

        let output = cmd.output()?;
        let combined = String::from_utf8_lossy(&output.stdout).to_string()
            + &String::from_utf8_lossy(&output.stderr);

        Ok(CommandOutput {
            success: output.status.success(),
            combined,
            command,
        })
    }
}
