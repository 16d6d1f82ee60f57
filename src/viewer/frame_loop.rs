// SPDX-License-Identifier: GPL-3.0-only
//! Tick loop driving the viewer
//!
//! Ticks run on the calling thread, one at a time: a tick is processed to
//! completion before the next one starts, so the viewer's surfaces have a
//! single writer and need no locking.

use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Action returned by the tick callback to control loop behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    /// Continue running the loop
    Continue,
    /// Stop the loop gracefully
    Stop,
}

/// Runs a tick callback at a fixed cadence
///
/// # Example
///
/// ```ignore
/// let ticks = TickLoop::new("simulate", Duration::from_millis(33))
///     .with_max_ticks(100)
///     .run(|_tick| {
///         viewer.tick(&mut source, &mapper);
///         LoopAction::Continue
///     });
/// ```
#[derive(Debug, Clone)]
pub struct TickLoop {
    /// Name for logging
    name: String,
    /// Target time between tick starts
    interval: Duration,
    /// Stop after this many ticks
    max_ticks: Option<u64>,
}

impl TickLoop {
    pub fn new(name: &str, interval: Duration) -> Self {
        Self {
            name: name.to_string(),
            interval,
            max_ticks: None,
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    /// Run until the callback returns `LoopAction::Stop` or the tick limit
    ///
    /// The callback receives the zero-based tick index. Returns the number of
    /// ticks executed.
    pub fn run<F>(&self, mut tick_fn: F) -> u64
    where
        F: FnMut(u64) -> LoopAction,
    {
        let interval_ms = self.interval.as_millis() as u64;
        info!(name = %self.name, interval_ms, "Starting tick loop");

        let mut ticks = 0u64;
        loop {
            if self.max_ticks.is_some_and(|max| ticks >= max) {
                debug!(name = %self.name, ticks, "Tick limit reached");
                break;
            }

            let started = Instant::now();
            let action = tick_fn(ticks);
            ticks += 1;

            if action == LoopAction::Stop {
                debug!(name = %self.name, ticks, "Loop requested stop");
                break;
            }

            // Sleep off whatever is left of this tick's slot
            if let Some(remaining) = self.interval.checked_sub(started.elapsed())
                && !remaining.is_zero()
            {
                thread::sleep(remaining);
            }
        }

        info!(name = %self.name, ticks, "Tick loop exiting");
        ticks
    }
}
