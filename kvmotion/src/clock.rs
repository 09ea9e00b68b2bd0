//! Fixed-step frame clock with a spin-wait timing strategy.
//!
//! The recording loop needs tick starts spaced by an exact step so that
//! frame indices in the output file map linearly onto wall-clock time.
//! A kernel sleep cannot hold that cadence: wakeup jitter on a desktop OS
//! is commonly in the 1-15ms range, which is visible when aligning a
//! recording against 24-48fps video.
//!
//! [`FrameClock::wait_until_elapsed`] therefore polls the monotonic clock
//! in a bounded busy loop until the step has passed. One core runs at
//! full utilization for the remainder of every tick in exchange for
//! sub-millisecond jitter.

use std::time::{Duration, Instant};

use crate::config::ConfigError;

/// Fixed-period tick scheduler for the recording loop.
///
/// The clock holds no mutable state; it is a validated step duration plus
/// the two timing primitives the loop composes each tick:
///
/// ```ignore
/// let clock = FrameClock::from_frame_rate(48.0)?;
/// loop {
///     let tick_start = clock.tick_start();
///     // ... sample trackers, append records ...
///     clock.wait_until_elapsed(tick_start);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FrameClock {
    step: Duration,
}

impl FrameClock {
    /// Create a clock with an explicit step duration.
    ///
    /// A zero step is a configuration error, rejected here so the loop
    /// never has to consider it at runtime.
    pub fn new(step: Duration) -> Result<Self, ConfigError> {
        if step.is_zero() {
            return Err(ConfigError::ZeroStep);
        }
        Ok(Self { step })
    }

    /// Create a clock from a target frame rate in ticks per second.
    pub fn from_frame_rate(frame_rate: f64) -> Result<Self, ConfigError> {
        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(ConfigError::InvalidFrameRate(frame_rate));
        }
        Self::new(Duration::from_secs_f64(1.0 / frame_rate))
    }

    /// The configured step duration.
    pub fn step(&self) -> Duration {
        self.step
    }

    /// The step duration in seconds, as written to the recording header.
    pub fn step_seconds(&self) -> f64 {
        self.step.as_secs_f64()
    }

    /// Capture the current high-resolution time as the start of a tick.
    pub fn tick_start(&self) -> Instant {
        Instant::now()
    }

    /// Block until at least one step has elapsed since `tick_start`.
    ///
    /// This is a spin wait: the monotonic clock is polled in a loop with
    /// no kernel sleep, so the wait never under-shoots and over-shoots by
    /// well under a millisecond on an unloaded machine. The calling core
    /// stays busy for the whole wait; that CPU cost is the price of the
    /// cadence guarantee and must not be "fixed" by sleeping.
    ///
    /// There is no cancellation. The wait is bounded by the step itself;
    /// the loop stops by not starting another tick.
    pub fn wait_until_elapsed(&self, tick_start: Instant) {
        while tick_start.elapsed() < self.step {
            std::hint::spin_loop();
        }
    }
}
