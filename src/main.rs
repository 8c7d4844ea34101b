//! Pomodoro Timer - a terminal productivity tool
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 (or 20) minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break after 4 pomodoros

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use pomodoro_term::cli::{Cli, Commands, Display, RunArgs, Session};
use pomodoro_term::sound::{try_create_player, SoundPlayer};

/// Main entry point
fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so they never interleave with the status line.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Builds a single-threaded runtime and executes the command on it.
fn run(cli: Cli) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("ランタイムの初期化に失敗しました")?;

    let result = runtime.block_on(execute(cli));

    // Stdin is read on a blocking thread that cannot be cancelled; don't
    // wait for it after Ctrl-C.
    runtime.shutdown_background();
    result
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => run_timer(&args).await?,
        Some(Commands::Completions { shell }) => generate_completions(shell),
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Runs the interactive timer on stdin/stdout.
async fn run_timer(args: &RunArgs) -> Result<()> {
    let config = args.to_config();

    let sound = if config.sound {
        try_create_player().map(|player| player as Arc<dyn SoundPlayer>)
    } else {
        None
    };

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    Session::new(&config, sound).run(input).await?;
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
