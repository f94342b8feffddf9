//! Process and environment access used by session detection

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::process::Command;

/// Exit status and captured stdout of a finished child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
}

/// Runs an external command synchronously and captures its output
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Read access to the process environment
pub trait EnvSource: Send + Sync {
    /// Raw value of `name`, or `None` when unset
    ///
    /// Values that are not valid unicode are still returned.
    fn var(&self, name: &str) -> Option<OsString>;
}

/// [`CommandRunner`] backed by `std::process::Command`
///
/// No timeout is enforced: a hanging child blocks the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("Failed to execute `{} {}`", program, args.join(" ")))?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

/// [`EnvSource`] backed by the real process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<OsString> {
        std::env::var_os(name)
    }
}
