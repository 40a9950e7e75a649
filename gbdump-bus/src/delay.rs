//! Blocking waits used for bus timing.

use std::time::Duration;

/// Blocking delay source for the timing margin.
pub trait Delay {
    /// Block for at least `duration`.
    fn wait(&mut self, duration: Duration);
}

/// Sleeps the calling thread. Overshoot is harmless: the margin is a lower
/// bound, never an exact duration.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn wait(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}
