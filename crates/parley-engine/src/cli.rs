use crate::executor::CommandExecutor;
use parley_common::CommandResult;
use std::error::Error;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Clone, Copy)]
pub struct OutputHandlers {
    pub out: fn(&str),
    pub err: fn(&str),
}

pub struct ReplOptions<'a> {
    pub banner_lines: &'a [&'a str],
    /// Printed when Ctrl-C arrives; the session carries on.
    pub ctrl_c_message: Option<&'a str>,
    /// Printed when stdin closes.
    pub farewell: Option<&'a str>,
}

/// Print a command's text unless it is empty. Returns `true` on the exit signal.
fn emit(result: &CommandResult, output: OutputHandlers) -> bool {
    match result {
        CommandResult::Output(text) if !text.trim().is_empty() => {
            (output.out)(text);
            false
        }
        CommandResult::Output(_) => false,
        CommandResult::Exit => true,
    }
}

/// Execute a single command, as for `parley -c`.
pub async fn run_command(executor: &mut CommandExecutor, output: OutputHandlers, line: &str) {
    let result = executor.execute(line).await;
    emit(&result, output);
}

/// Execute each line of a script. Blank lines and `#` comments are skipped;
/// an `exit` line ends the run.
pub async fn run_file(
    executor: &mut CommandExecutor,
    output: OutputHandlers,
    path: &str,
) -> Result<(), Box<dyn Error>> {
    let content = tokio::fs::read_to_string(path).await?;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let result = executor.execute(trimmed).await;
        if emit(&result, output) {
            break;
        }
    }
    Ok(())
}

/// Possible outcomes from reading a single REPL line.
enum ReadLineResult {
    Input(String),
    /// Ctrl-C while waiting for input.
    Interrupted,
    /// Stdin closed.
    Eof,
    Error(io::Error),
}

async fn read_line(
    reader: &mut tokio::io::Lines<BufReader<tokio::io::Stdin>>,
) -> ReadLineResult {
    tokio::select! {
        line = reader.next_line() => match line {
            Ok(Some(input)) => ReadLineResult::Input(input),
            Ok(None) => ReadLineResult::Eof,
            Err(e) => ReadLineResult::Error(e),
        },
        _ = tokio::signal::ctrl_c() => ReadLineResult::Interrupted,
    }
}

pub async fn run_repl(
    executor: &mut CommandExecutor,
    output: OutputHandlers,
    options: ReplOptions<'_>,
) -> Result<(), Box<dyn Error>> {
    for line in options.banner_lines {
        (output.out)(line);
    }

    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin).lines();
    let mut stdout = io::stdout();

    loop {
        print!("{}$ ", executor.cwd().display());
        stdout.flush()?;

        match read_line(&mut reader).await {
            ReadLineResult::Input(line) => {
                let result = executor.execute(&line).await;
                if emit(&result, output) {
                    break;
                }
            }
            ReadLineResult::Interrupted => {
                if let Some(message) = options.ctrl_c_message {
                    (output.err)(&format!("\n{}", message));
                }
            }
            ReadLineResult::Eof => {
                if let Some(message) = options.farewell {
                    (output.out)(&format!("\n{}", message));
                }
                break;
            }
            ReadLineResult::Error(e) => return Err(e.into()),
        }
    }
    Ok(())
}
