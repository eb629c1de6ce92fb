#![allow(dead_code)]

use async_trait::async_trait;
use parley_engine::executor::CommandExecutor;
use parley_engine::history::HistoryStore;
use parley_engine::sampler::{MemorySample, ProcessSample, ResourceSampler, SamplerError};
use parley_engine::shell::{ShellError, ShellOutput, ShellRunner};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records every command it is asked to run and replies with a fixed result.
#[derive(Clone, Default)]
pub struct MockShell {
    pub calls: Arc<Mutex<Vec<(String, PathBuf)>>>,
    pub reply: Arc<Mutex<Option<ShellOutput>>>,
    pub fail_with_timeout: bool,
}

impl MockShell {
    pub fn replying(stdout: &str, stderr: &str) -> Self {
        let shell = Self::default();
        *shell.reply.lock().unwrap() = Some(ShellOutput {
            stdout: stdout.into(),
            stderr: stderr.into(),
            status: Some(0),
        });
        shell
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(c, _)| c.clone()).collect()
    }
}

#[async_trait]
impl ShellRunner for MockShell {
    async fn run(
        &self,
        command: &str,
        cwd: &Path,
        timeout: Duration,
    ) -> Result<ShellOutput, ShellError> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), cwd.to_path_buf()));
        if self.fail_with_timeout {
            return Err(ShellError::Timeout(timeout.as_secs()));
        }
        Ok(self.reply.lock().unwrap().clone().unwrap_or_default())
    }
}

pub struct FixedSampler;

impl ResourceSampler for FixedSampler {
    fn cpu(&self) -> Result<Vec<f32>, SamplerError> {
        Ok(vec![12.5, 3.0])
    }

    fn memory(&self) -> Result<MemorySample, SamplerError> {
        Ok(MemorySample {
            total_bytes: 8 * 1024 * 1024 * 1024,
            used_bytes: 2 * 1024 * 1024 * 1024,
            available_bytes: 6 * 1024 * 1024 * 1024,
            percent: 25.0,
        })
    }

    fn processes(&self, limit: usize) -> Result<Vec<ProcessSample>, SamplerError> {
        Ok((1..=200)
            .map(|pid| ProcessSample {
                pid,
                name: format!("a-very-long-process-name-{}", pid),
                owner: Some("root".into()),
            })
            .take(limit)
            .collect())
    }
}

pub struct BrokenSampler;

impl ResourceSampler for BrokenSampler {
    fn cpu(&self) -> Result<Vec<f32>, SamplerError> {
        Err(SamplerError::Failed("permission denied reading /proc/stat".into()))
    }

    fn memory(&self) -> Result<MemorySample, SamplerError> {
        Err(SamplerError::Failed("no memory info".into()))
    }

    fn processes(&self, _limit: usize) -> Result<Vec<ProcessSample>, SamplerError> {
        Err(SamplerError::Failed("no process table".into()))
    }
}

/// Executor rooted in `dir` with an in-memory history and a mock shell.
pub fn executor_in(dir: &Path) -> (CommandExecutor, MockShell) {
    let shell = MockShell::default();
    let executor = CommandExecutor::new(dir, HistoryStore::in_memory())
        .with_shell(Box::new(shell.clone()))
        .with_sampler(Box::new(FixedSampler));
    (executor, shell)
}

pub fn text(result: parley_engine::CommandResult) -> String {
    result
        .output()
        .expect("expected text output, got exit signal")
        .to_string()
}
