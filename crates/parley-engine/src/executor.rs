//! Command dispatch: history, translation, built-ins and shell fallback.
//!
//! `CommandExecutor::execute` is the single entry point every front end uses.
//! It never fails: every path ends in text or the exit signal.

use crate::builtins::{HandlerError, fs, system, text};
use crate::config::{HistoryConfig, ParleyConfig};
use crate::formatter::format_shell_output;
use crate::sampler::{self, ResourceSampler};
use crate::shell::{HostShell, ShellRunner};
use parley_common::history::{FileSink, HistorySink, HistoryStore, NullSink};
use parley_common::{Builtin, CanonicalCommand, CommandResult, normalize_path};
use parley_parser::translate;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("Cannot determine working directory: {0}")]
    WorkingDir(#[from] std::io::Error),
}

/// Tunables that do not change during a session.
#[derive(Debug, Clone)]
pub struct ExecutorSettings {
    pub history_limit: usize,
    pub shell_timeout: Duration,
    pub process_limit: usize,
    pub name_width: usize,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self::from(&ParleyConfig::default())
    }
}

impl From<&ParleyConfig> for ExecutorSettings {
    fn from(config: &ParleyConfig) -> Self {
        Self {
            history_limit: config.history.limit,
            shell_timeout: Duration::from_secs(config.shell.timeout_secs),
            process_limit: config.resources.process_limit,
            name_width: config.resources.name_width,
        }
    }
}

pub struct CommandExecutor {
    /// Working directory for path resolution and shell commands. Set at
    /// construction and changed only by `cd`; the process cwd is left alone.
    cwd: PathBuf,
    history: HistoryStore,
    shell: Box<dyn ShellRunner>,
    sampler: Box<dyn ResourceSampler>,
    settings: ExecutorSettings,
}

impl CommandExecutor {
    /// Executor rooted at `cwd` with the host shell and the default sampler.
    pub fn new(cwd: impl Into<PathBuf>, history: HistoryStore) -> Self {
        Self {
            cwd: cwd.into(),
            history,
            shell: Box::new(HostShell::new()),
            sampler: sampler::default_sampler(),
            settings: ExecutorSettings::default(),
        }
    }

    /// Build an executor from configuration, starting in the process cwd.
    pub fn from_config(config: &ParleyConfig) -> Result<Self, ExecutorError> {
        let cwd = std::env::current_dir()?;
        let history = HistoryStore::open(history_sink(&config.history, &cwd));
        let shell = match &config.shell.program {
            Some(program) => HostShell::with_program(program.clone()),
            None => HostShell::new(),
        };

        Ok(Self::new(cwd, history)
            .with_shell(Box::new(shell))
            .with_settings(ExecutorSettings::from(config)))
    }

    pub fn with_shell(mut self, shell: Box<dyn ShellRunner>) -> Self {
        self.shell = shell;
        self
    }

    pub fn with_sampler(mut self, sampler: Box<dyn ResourceSampler>) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn with_settings(mut self, settings: ExecutorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Run one line of user input.
    pub async fn execute(&mut self, input: &str) -> CommandResult {
        if input.trim().is_empty() {
            return CommandResult::empty();
        }

        // History records what was typed, before any rewriting.
        self.history.append(input);

        let translated = translate(input);
        let Some(command) = CanonicalCommand::parse(&translated) else {
            return CommandResult::empty();
        };

        match command.builtin() {
            Some(Builtin::Exit) => CommandResult::Exit,
            Some(builtin) => {
                tracing::debug!("Dispatching built-in {}", builtin.name());
                match self.run_builtin(builtin, &command.args) {
                    Ok(output) => CommandResult::Output(output),
                    Err(e) => CommandResult::Output(format!("Error: {}", e)),
                }
            }
            None => {
                tracing::debug!("Forwarding to shell: {}", translated);
                CommandResult::Output(self.run_shell(&translated).await)
            }
        }
    }

    fn run_builtin(&mut self, builtin: Builtin, args: &[String]) -> Result<String, HandlerError> {
        let cwd = self.cwd.as_path();
        match builtin {
            Builtin::List => Ok(fs::list(cwd, args)),
            Builtin::PrintWorkingDir => Ok(fs::print_working_dir(cwd)),
            Builtin::ChangeDir => Ok(fs::change_dir(&mut self.cwd, args)),
            Builtin::MakeDir => fs::make_dir(cwd, args),
            Builtin::RemoveDir => Ok(fs::remove_dir(cwd, args)),
            Builtin::RemoveFile => fs::remove_file(cwd, args),
            Builtin::Touch => fs::touch(cwd, args),
            Builtin::Move => fs::move_path(cwd, args),
            Builtin::Copy => fs::copy_path(cwd, args),
            Builtin::Cat => text::cat(cwd, args),
            Builtin::Echo => text::echo(cwd, args),
            Builtin::History => Ok(self.run_history(args)),
            Builtin::Clear => Ok(system::clear_screen()),
            Builtin::Cpu => Ok(system::cpu(self.sampler.as_ref())),
            Builtin::Memory => Ok(system::memory(self.sampler.as_ref())),
            Builtin::Processes => Ok(system::processes(
                self.sampler.as_ref(),
                self.settings.process_limit,
                self.settings.name_width,
            )),
            Builtin::Help => Ok(system::help()),
            // Handled before dispatch.
            Builtin::Exit => Ok(String::new()),
        }
    }

    /// `history -c` clears; otherwise list the entries recorded before this
    /// invocation.
    fn run_history(&mut self, args: &[String]) -> String {
        if args.first().map(String::as_str) == Some("-c") {
            self.history.clear();
            return "History cleared".to_string();
        }

        // The newest entry is this `history` call itself.
        let mut lines = self
            .history
            .recent(self.settings.history_limit.saturating_add(1));
        lines.pop();
        lines.join("\n")
    }

    async fn run_shell(&self, command: &str) -> String {
        match self
            .shell
            .run(command, &self.cwd, self.settings.shell_timeout)
            .await
        {
            Ok(output) => format_shell_output(&output),
            Err(e) => format!("System command error: {}", e),
        }
    }
}

fn history_sink(config: &HistoryConfig, cwd: &Path) -> Box<dyn HistorySink> {
    if !config.enabled {
        return Box::new(NullSink);
    }
    let path = match &config.file {
        Some(file) => normalize_path(&file.to_string_lossy(), cwd),
        None => cwd.join(HistoryConfig::DEFAULT_FILE_NAME),
    };
    tracing::info!("History file: {}", path.display());
    Box::new(FileSink::new(path))
}
