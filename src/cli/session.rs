//! Interactive terminal session.
//!
//! Reads one command per line, forwards it to the countdown driver and
//! re-renders after every state change. Ticks and input are handled by a
//! single `select!` loop, so the timer state is only ever touched by one
//! event at a time.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::display::Display;
use crate::sound::SoundPlayer;
use crate::timer::{CountdownDriver, TimerEngine, TimerEvent};
use crate::types::{Mode, OutputFormat, PomodoroConfig, TimerState};

// ============================================================================
// Intent
// ============================================================================

/// A user action parsed from one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Start or pause the countdown
    Toggle,
    /// Refill the current interval
    Reset,
    /// Switch to a mode
    Select(Mode),
    /// Show key bindings
    Help,
    /// End the session
    Quit,
}

impl Intent {
    /// Parses a line of input. Returns None for unrecognised input.
    ///
    /// Only `s` and an empty line toggle, so pressing Enter acts as the
    /// start/pause button.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "" | "s" => Some(Intent::Toggle),
            "r" | "reset" => Some(Intent::Reset),
            "w" | "work" => Some(Intent::Select(Mode::Work)),
            "b" | "break" => Some(Intent::Select(Mode::ShortBreak)),
            "l" | "long" => Some(Intent::Select(Mode::LongBreak)),
            "?" | "h" | "help" => Some(Intent::Help),
            "q" | "quit" | "exit" => Some(Intent::Quit),
            _ => None,
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// One run of the timer, from launch to quit.
pub struct Session {
    driver: CountdownDriver,
    events: mpsc::UnboundedReceiver<TimerEvent>,
    output: OutputFormat,
    /// Last state written out, used to skip unchanged JSON snapshots
    last_rendered: Option<TimerState>,
}

/// Decides whether a Ctrl-C wait result ends the session.
///
/// A failure to install the handler is logged; the session keeps running
/// and can still be left with `q` or end of input.
fn interrupted(result: io::Result<()>) -> bool {
    match result {
        Ok(()) => {
            debug!("Interrupted");
            true
        }
        Err(e) => {
            warn!("Ctrl-C handler unavailable: {}", e);
            false
        }
    }
}

impl Session {
    /// Creates a session with a fresh timer state.
    pub fn new(config: &PomodoroConfig, sound: Option<Arc<dyn SoundPlayer>>) -> Self {
        let (event_tx, events) = mpsc::unbounded_channel();
        let engine = TimerEngine::new(config.duration_table(), sound, event_tx);

        Self {
            driver: CountdownDriver::new(engine),
            events,
            output: config.output,
            last_rendered: None,
        }
    }

    /// Applies a user intent. `Quit` is handled by [`Session::run`].
    pub fn apply(&mut self, intent: Intent) {
        debug!(?intent, "Applying intent");
        match intent {
            Intent::Toggle => self.driver.toggle(),
            Intent::Reset => self.driver.reset(),
            Intent::Select(mode) => self.driver.switch_mode(mode),
            Intent::Help => Display::show_help(self.output),
            Intent::Quit => {}
        }
    }

    /// Returns the current timer state.
    pub fn state(&self) -> &TimerState {
        self.driver.state()
    }

    /// Runs until `q`, end of input or Ctrl-C.
    ///
    /// Consumes the session; the tick source is released when this returns,
    /// whichever way the loop ended. Returns the final timer state.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run<R>(mut self, input: R) -> Result<TimerState>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let ctrl_c = signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let mut ctrl_c_armed = true;

        info!(output = ?self.output, "Session started");
        self.render()?;

        loop {
            tokio::select! {
                _ = self.driver.next_tick() => {}
                line = lines.next_line() => {
                    let Some(line) = line.context("入力の読み込みに失敗しました")? else {
                        debug!("End of input");
                        break;
                    };
                    match Intent::parse(&line) {
                        Some(Intent::Quit) => break,
                        Some(intent) => self.apply(intent),
                        None => Display::show_unknown_input(&line, self.output),
                    }
                }
                result = &mut ctrl_c, if ctrl_c_armed => {
                    if interrupted(result) {
                        break;
                    }
                    ctrl_c_armed = false;
                }
            }

            self.flush_events();
            self.render()?;
        }

        self.flush_events();
        if self.output == OutputFormat::Status {
            Display::finish();
        }

        let state = self.driver.state().clone();
        info!(
            completed_work_sessions = state.completed_work_sessions,
            "Session ended"
        );
        Ok(state)
    }

    fn flush_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            if self.output == OutputFormat::Status {
                Display::show_event(&event);
            }
        }
    }

    /// Writes the current state. Returns false if nothing was written.
    ///
    /// The status line is always redrawn, since notices may have cleared
    /// it; JSON snapshots are only written when the state changed.
    fn render(&mut self) -> Result<bool> {
        let state = self.driver.state();
        match self.output {
            OutputFormat::Status => Display::show_status(state)?,
            OutputFormat::Json => {
                if self.last_rendered.as_ref() == Some(state) {
                    return Ok(false);
                }
                Display::show_snapshot(state)?;
            }
        }
        self.last_rendered = Some(state.clone());
        Ok(true)
    }
}

// ============================================================================
// Tests
// ============================================================================
