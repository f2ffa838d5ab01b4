//! Time management utilities

use std::time::{Duration, Instant};

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Restart timing from now, discarding accumulated state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance the timer and return the elapsed seconds since the previous
    /// tick (should be called once per frame)
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last tick in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time across all ticks
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

/// Cooperative frame-rate throttle.
///
/// Sleeps out the remainder of a fixed target interval each frame so the loop
/// does not busy-spin the CPU. When an iteration overruns its interval the
/// limiter realigns to now instead of banking the debt.
pub struct FrameLimiter {
    interval: Duration,
    next_deadline: Instant,
}

impl FrameLimiter {
    /// Create a limiter with the given target frame interval
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_deadline: Instant::now() + interval,
        }
    }

    /// Create a limiter from a target interval in milliseconds
    pub fn from_millis(interval_ms: u64) -> Self {
        Self::new(Duration::from_millis(interval_ms))
    }

    /// The configured target frame interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleep until the next frame deadline, then schedule the following one
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next_deadline {
            std::thread::sleep(self.next_deadline - now);
            self.next_deadline += self.interval;
        } else {
            // Overran the frame budget; realign rather than replay the debt.
            self.next_deadline = Instant::now() + self.interval;
        }
    }
}
