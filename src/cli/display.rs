//! Display utilities for the Pomodoro Timer CLI.
//!
//! This module provides formatted output for:
//! - The status line (mode, remaining time, toggle label, session count)
//! - JSON snapshots
//! - Event notices, help and error messages

use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::timer::TimerEvent;
use crate::types::{format_time, Mode, OutputFormat, Snapshot, TimerState};

/// Clears the current terminal line and returns the cursor to column 0.
const CLEAR_LINE: &str = "\r\x1b[2K";

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Returns the label of the start/pause button for the given state.
    pub fn toggle_label(is_running: bool) -> &'static str {
        if is_running {
            "一時停止"
        } else {
            "開始"
        }
    }

    /// Builds the status line without colours.
    pub fn status_line(state: &TimerState) -> String {
        format!(
            "[{}] {}  ({})  完了: {}",
            state.mode.label(),
            format_time(state.remaining_seconds),
            Self::toggle_label(state.is_running),
            state.completed_work_sessions
        )
    }

    /// Rewrites the status line in place, coloured by the mode theme.
    pub fn show_status(state: &TimerState) -> Result<()> {
        let line = state.mode.theme().paint(&Self::status_line(state));
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}{}", CLEAR_LINE, line).context("ステータスの表示に失敗しました")?;
        stdout.flush().context("ステータスの表示に失敗しました")?;
        Ok(())
    }

    /// Prints the state as one JSON line.
    pub fn show_snapshot(state: &TimerState) -> Result<()> {
        let json = serde_json::to_string(&Snapshot::from_timer_state(state))
            .context("スナップショットのシリアライズに失敗しました")?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", json).context("スナップショットの出力に失敗しました")?;
        stdout.flush().context("スナップショットの出力に失敗しました")?;
        Ok(())
    }

    /// Returns a one-line notice for events worth announcing.
    ///
    /// Ticks and plain toggles are already visible in the status line.
    pub fn event_notice(event: &TimerEvent) -> Option<String> {
        match event {
            TimerEvent::Completed {
                mode: Mode::Work,
                completed_work_sessions,
                next,
            } => Some(format!(
                "* 作業セッション #{} が完了しました。次は{}です",
                completed_work_sessions,
                next.label()
            )),
            TimerEvent::Completed { mode, next, .. } if mode.is_break() => Some(format!(
                "* {}が終わりました。次は{}です",
                mode.label(),
                next.label()
            )),
            _ => None,
        }
    }

    /// Prints the notice for an event, if it has one.
    pub fn show_event(event: &TimerEvent) {
        if let Some(notice) = Self::event_notice(event) {
            println!("{}{}", CLEAR_LINE, notice);
        }
    }

    /// Returns the key bindings text.
    pub fn help_text() -> &'static str {
        "操作方法:
  s / Enter  開始・一時停止
  r          リセット
  w          作業に切り替え
  b          短い休憩に切り替え
  l          長い休憩に切り替え
  q          終了"
    }

    /// Returns the hint shown for unrecognised input.
    pub fn unknown_input_message(input: &str) -> String {
        format!("不明な入力です: '{}' (? でヘルプを表示)", input.trim())
    }

    /// Shows the key bindings.
    ///
    /// In JSON mode stdout carries snapshots only, so this goes to stderr.
    pub fn show_help(output: OutputFormat) {
        Self::show_notice(Self::help_text(), output);
    }

    /// Shows a hint for unrecognised input.
    pub fn show_unknown_input(input: &str, output: OutputFormat) {
        Self::show_notice(&Self::unknown_input_message(input), output);
    }

    fn show_notice(text: &str, output: OutputFormat) {
        match output {
            OutputFormat::Status => println!("{}{}", CLEAR_LINE, text),
            OutputFormat::Json => eprintln!("{}", text),
        }
    }

    /// Ends the status line before exiting.
    pub fn finish() {
        println!();
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================
