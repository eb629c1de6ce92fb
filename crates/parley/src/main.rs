use clap::Parser;
use parley_engine::cli::{self, OutputHandlers, ReplOptions};
use parley_engine::config::{ConfigLoader, ParleyConfig};
use parley_engine::executor::CommandExecutor;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "parley",
    version,
    about = "Terminal that understands plain-English file commands"
)]
struct Args {
    /// Run a single command and exit
    #[arg(short = 'c', long = "command")]
    command: Option<String>,

    /// Script to execute line by line (non-interactive mode)
    #[arg(long)]
    file: Option<String>,

    /// Config file (defaults to ./parley.yaml, then ~/.parley/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// History file to use instead of the configured one
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Do not persist history
    #[arg(long)]
    no_history: bool,

    /// Shell fallback timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

impl Args {
    fn apply(&self, config: &mut ParleyConfig) {
        if let Some(path) = &self.history_file {
            config.history.file = Some(path.clone());
        }
        if self.no_history {
            config.history.enabled = false;
        }
        if let Some(secs) = self.timeout {
            config.shell.timeout_secs = secs;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from(path).await?,
        None => ConfigLoader::load_default().await?,
    };
    args.apply(&mut config);
    config.validate()?;

    let mut executor = CommandExecutor::from_config(&config)?;
    tracing::debug!("Starting in {}", executor.cwd().display());
    let output = OutputHandlers {
        out: |msg| println!("{}", msg),
        err: |msg| eprintln!("{}", msg),
    };

    if let Some(command) = &args.command {
        cli::run_command(&mut executor, output, command).await;
    } else if let Some(file_path) = &args.file {
        cli::run_file(&mut executor, output, file_path)
            .await
            .map_err(|e| anyhow::anyhow!("Error executing file {}: {}", file_path, e))?;
    } else {
        let repl_options = ReplOptions {
            banner_lines: &[
                "Parley terminal (plain-English and direct commands)",
                "Type 'exit' to quit, 'help' for command list",
            ],
            ctrl_c_message: Some("Use 'exit' or 'quit' to exit"),
            farewell: Some("Goodbye!"),
        };
        cli::run_repl(&mut executor, output, repl_options)
            .await
            .map_err(|e| anyhow::anyhow!("Error during session: {}", e))?;
    }

    Ok(())
}
