//! Countdown driver: feeds one-second ticks into the engine.
//!
//! The tick source is a [`Ticker`] that only exists while the engine is
//! running. Every operation that can change the running flag goes through
//! [`CountdownDriver`], which re-synchronises the ticker afterwards, so the
//! tick source is released on every path out of Running: pause, reset, mode
//! switch, completion, and dropping the driver itself.

use std::future;

use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};
use tracing::debug;

use super::engine::TimerEngine;
use crate::types::{Mode, TimerState};

/// Period of the countdown tick.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// Ticker
// ============================================================================

/// A periodic tick source.
///
/// The first tick fires one full period after creation.
#[derive(Debug)]
pub struct Ticker {
    interval: Interval,
}

impl Ticker {
    /// Starts a new tick source with the given period.
    pub fn start(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        debug!(period_ms = period.as_millis() as u64, "Tick source acquired");
        Self { interval }
    }

    /// Waits for the next tick.
    ///
    /// Cancel safe.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        debug!("Tick source released");
    }
}

// ============================================================================
// CountdownDriver
// ============================================================================

/// Owns the engine and the tick source that drives it.
pub struct CountdownDriver {
    engine: TimerEngine,
    ticker: Option<Ticker>,
    period: Duration,
}

impl CountdownDriver {
    /// Creates a driver ticking once per second.
    pub fn new(engine: TimerEngine) -> Self {
        Self::with_period(engine, TICK_PERIOD)
    }

    /// Creates a driver with a custom tick period.
    pub fn with_period(engine: TimerEngine, period: Duration) -> Self {
        let mut driver = Self {
            engine,
            ticker: None,
            period,
        };
        driver.sync_ticker();
        driver
    }

    /// Starts or pauses the countdown.
    pub fn toggle(&mut self) {
        self.engine.toggle();
        self.sync_ticker();
    }

    /// Stops the countdown and refills the current interval.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.sync_ticker();
    }

    /// Stops the countdown and loads a full interval of `mode`.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.engine.switch_mode(mode);
        self.sync_ticker();
    }

    /// Waits for the next tick and applies it.
    ///
    /// Never resolves while the countdown is paused. Returns true if the tick
    /// completed the interval. Cancel safe: dropping the future before the
    /// tick fires leaves the state untouched.
    pub async fn next_tick(&mut self) -> bool {
        match self.ticker.as_mut() {
            Some(ticker) => ticker.tick().await,
            None => future::pending::<()>().await,
        }

        let completed = self.engine.tick();
        self.sync_ticker();
        completed
    }

    /// Returns true while a tick source is held.
    pub fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        self.engine.get_state()
    }

    fn sync_ticker(&mut self) {
        match (self.engine.is_running(), self.ticker.is_some()) {
            (true, false) => self.ticker = Some(Ticker::start(self.period)),
            (false, true) => self.ticker = None,
            _ => {}
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tokio::sync::mpsc;
    use tokio::time::timeout;

    use crate::sound::{MockSoundPlayer, SoundPlayer};
    use crate::timer::TimerEvent;
    use crate::types::DurationTable;

    fn create_driver() -> (
        CountdownDriver,
        Arc<MockSoundPlayer>,
        mpsc::UnboundedReceiver<TimerEvent>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sound = Arc::new(MockSoundPlayer::new());
        let engine = TimerEngine::new(
            DurationTable::default(),
            Some(sound.clone() as Arc<dyn SoundPlayer>),
            tx,
        );
        (CountdownDriver::new(engine), sound, rx)
    }

    // ------------------------------------------------------------------------
    // Ticker lifecycle
    // ------------------------------------------------------------------------

    mod ticker_lifecycle_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_no_ticker_while_paused() {
            let (driver, _sound, _rx) = create_driver();
            assert!(!driver.has_ticker());
        }

        #[tokio::test(start_paused = true)]
        async fn test_ticker_follows_toggle() {
            let (mut driver, _sound, _rx) = create_driver();

            driver.toggle();
            assert!(driver.has_ticker());

            driver.toggle();
            assert!(!driver.has_ticker());
        }

        #[tokio::test(start_paused = true)]
        async fn test_reset_releases_ticker() {
            let (mut driver, _sound, _rx) = create_driver();

            driver.toggle();
            driver.reset();

            assert!(!driver.has_ticker());
            assert!(!driver.state().is_running);
        }

        #[tokio::test(start_paused = true)]
        async fn test_switch_mode_releases_ticker() {
            let (mut driver, _sound, _rx) = create_driver();

            driver.toggle();
            driver.switch_mode(Mode::LongBreak);

            assert!(!driver.has_ticker());
            assert_eq!(driver.state().remaining_seconds, 900);
        }

        #[tokio::test(start_paused = true)]
        async fn test_paused_driver_never_ticks() {
            let (mut driver, _sound, _rx) = create_driver();

            let result = timeout(Duration::from_secs(5), driver.next_tick()).await;

            assert!(result.is_err(), "Paused driver should not tick");
            assert_eq!(driver.state().remaining_seconds, 1500);
        }
    }

    // ------------------------------------------------------------------------
    // Countdown
    // ------------------------------------------------------------------------

    mod countdown_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_first_tick_after_one_period() {
            let (mut driver, _sound, _rx) = create_driver();
            driver.toggle();

            let start = Instant::now();
            driver.next_tick().await;

            assert_eq!(start.elapsed(), TICK_PERIOD);
            assert_eq!(driver.state().remaining_seconds, 1499);
        }

        #[tokio::test(start_paused = true)]
        async fn test_n_ticks() {
            let (mut driver, _sound, _rx) = create_driver();
            driver.toggle();

            for _ in 0..42 {
                assert!(!driver.next_tick().await);
            }

            assert_eq!(driver.state().remaining_seconds, 1500 - 42);
            assert!(driver.state().is_running);
            assert!(driver.has_ticker());
        }

        #[tokio::test(start_paused = true)]
        async fn test_full_work_interval() {
            let (mut driver, sound, _rx) = create_driver();
            driver.toggle();

            let mut completions = 0;
            for _ in 0..1500 {
                if driver.next_tick().await {
                    completions += 1;
                }
            }

            assert_eq!(completions, 1);
            assert_eq!(sound.play_count(), 1);

            let state = driver.state();
            assert_eq!(state.mode, Mode::ShortBreak);
            assert_eq!(state.completed_work_sessions, 1);
            assert_eq!(state.remaining_seconds, 300);
            assert!(!state.is_running);
            assert!(!driver.has_ticker(), "Completion should release the ticker");
        }

        #[tokio::test(start_paused = true)]
        async fn test_pause_resume_keeps_remaining() {
            let (mut driver, _sound, _rx) = create_driver();
            driver.toggle();
            for _ in 0..3 {
                driver.next_tick().await;
            }

            driver.toggle();
            tokio::time::advance(Duration::from_secs(10)).await;
            driver.toggle();
            driver.next_tick().await;

            assert_eq!(driver.state().remaining_seconds, 1496);
        }

        #[tokio::test(start_paused = true)]
        async fn test_custom_period() {
            let (tx, _rx) = mpsc::unbounded_channel();
            let engine = TimerEngine::new(DurationTable::default(), None, tx);
            let mut driver = CountdownDriver::with_period(engine, Duration::from_millis(10));
            driver.toggle();

            let start = Instant::now();
            driver.next_tick().await;

            assert_eq!(start.elapsed(), Duration::from_millis(10));
        }
    }
}
