//! Command definitions for the Pomodoro Timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::types::{OutputFormat, PomodoroConfig, WorkLength};

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Timer - a terminal countdown for work and break intervals
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro",
    version,
    about = "ターミナルで動くポモドーロタイマー",
    long_about = "作業と休憩を交互に繰り返すシンプルなポモドーロタイマー。\n\
                  4回の作業ごとに長い休憩を挟み、各インターバルの終了時に通知音を鳴らします。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the interactive timer
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Work interval length (classic = 25 min, short = 20 min)
    #[arg(short, long, value_enum, default_value_t = WorkLength::Classic)]
    pub work_length: WorkLength,

    /// Disable the completion chime
    #[arg(long)]
    pub no_sound: bool,

    /// Print one JSON snapshot per state change instead of a status line
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    /// Resolves the arguments into a timer configuration.
    pub fn to_config(&self) -> PomodoroConfig {
        let output = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Status
        };

        PomodoroConfig::default()
            .with_work_length(self.work_length)
            .with_sound(!self.no_sound)
            .with_output(output)
    }
}

// ============================================================================
// Tests
// ============================================================================
