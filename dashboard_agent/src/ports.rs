//! Capability ports for the outside world the collectors read from.
//!
//! Collectors never touch `/proc`, `/etc` or child processes directly. They go
//! through [`FileSystem`] and [`ProcessRunner`] so tests can feed synthetic
//! fixtures (see [`crate::mock`]) instead of depending on the live machine.

use async_trait::async_trait;
use std::io;
use std::path::Path;
use tokio::process::Command;

/// Read-only access to text files (kernel pseudo-files, os-release).
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Captured result of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs an external program to completion and captures its output.
///
/// Implementations must be cancel-safe: dropping the returned future has to
/// tear the child down rather than leave it running.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput>;
}

/// Real filesystem backed by `tokio::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

#[async_trait]
impl FileSystem for RealFs {
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}

/// Spawns real processes via `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioRunner;

#[async_trait]
impl ProcessRunner for TokioRunner {
    async fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await?;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
