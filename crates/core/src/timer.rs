//! Frame pacing for the fixed-tick simulation loop.

use std::time::{Duration, Instant};

/// Measures wall-clock time between frames and counts ticks.
///
/// The simulation advances by one logical tick per frame regardless of
/// elapsed time; the timer only paces the loop and reports frame rates.
#[derive(Debug)]
pub struct Timer {
    start: Instant,
    last_tick: Instant,
    frame_interval: Duration,
    ticks: u64,
}

impl Timer {
    /// Create a timer that paces frames at `frames_per_second`.
    ///
    /// A rate of zero disables pacing.
    pub fn new(frames_per_second: u32) -> Self {
        let now = Instant::now();
        let frame_interval = if frames_per_second == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(1_000_000_000 / u64::from(frames_per_second))
        };
        Self {
            start: now,
            last_tick: now,
            frame_interval,
            ticks: 0,
        }
    }

    /// Total time since the timer was created or reset.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Target duration of one frame.
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Record the end of a frame and return the time it took.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now - self.last_tick;
        self.last_tick = now;
        self.ticks += 1;
        delta
    }

    /// Time left in the current frame before the next tick is due.
    pub fn remaining(&self) -> Duration {
        self.frame_interval.saturating_sub(self.last_tick.elapsed())
    }

    /// Average ticks per second since the timer started.
    pub fn average_rate(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 { self.ticks as f64 / secs } else { 0.0 }
    }

    /// Reset the timer to the current time and clear the tick count.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last_tick = now;
        self.ticks = 0;
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(60)
    }
}
