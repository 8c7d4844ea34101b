//! Timer module for the Pomodoro Timer.
//!
//! - `engine`: mode/duration state machine and session rotation
//! - `driver`: scoped one-second tick source feeding the engine

pub mod driver;
pub mod engine;

pub use driver::{CountdownDriver, Ticker, TICK_PERIOD};
pub use engine::{next_mode, TimerEngine, TimerEvent};
