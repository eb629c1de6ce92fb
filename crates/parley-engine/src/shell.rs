//! Fallback execution of unrecognized commands through the host shell.

use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` if the child was killed by a signal.
    pub status: Option<i32>,
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("timed out after {0} seconds")]
    Timeout(u64),
    #[error("failed to launch shell: {0}")]
    Launch(#[source] io::Error),
    #[error("failed to collect output: {0}")]
    Wait(#[source] io::Error),
}

/// Runs a command line on the host. Injected into the executor so tests can
/// substitute a recording mock.
#[async_trait]
pub trait ShellRunner: Send + Sync {
    async fn run(
        &self,
        command: &str,
        cwd: &Path,
        timeout: Duration,
    ) -> Result<ShellOutput, ShellError>;
}

/// `sh -c` (or `cmd /C` on Windows) with captured output.
#[derive(Debug, Clone, Default)]
pub struct HostShell {
    program: Option<String>,
}

impl HostShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `program -c` instead of the platform default.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    fn command(&self, text: &str) -> tokio::process::Command {
        let (program, flag) = match &self.program {
            Some(program) => (program.as_str(), "-c"),
            None if cfg!(windows) => ("cmd", "/C"),
            None => ("sh", "-c"),
        };
        let mut cmd = tokio::process::Command::new(program);
        cmd.arg(flag).arg(text);
        cmd
    }
}

#[async_trait]
impl ShellRunner for HostShell {
    async fn run(
        &self,
        command: &str,
        cwd: &Path,
        timeout: Duration,
    ) -> Result<ShellOutput, ShellError> {
        let child = self
            .command(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(ShellError::Launch)?;

        // Dropping the wait future on timeout drops the child, which kills it.
        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(ShellOutput {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                status: output.status.code(),
            }),
            Ok(Err(e)) => Err(ShellError::Wait(e)),
            Err(_) => {
                tracing::warn!("Shell command timed out: {}", command);
                Err(ShellError::Timeout(timeout.as_secs()))
            }
        }
    }
}
