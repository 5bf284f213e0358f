use std::thread;
use std::time::Duration;

/// Randomised pause between productions, simulating a variable rate
///
/// Purely cosmetic: nothing in the pipeline depends on it for correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pacing {
    min: Duration,
    max: Duration,
}

impl Pacing {
    /// No pause at all
    pub const fn none() -> Self {
        Self {
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    /// Pause a uniformly random duration in `[min, max]`
    ///
    /// The bounds are swapped if given in the wrong order.
    pub fn between(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.max.is_zero()
    }

    /// Pick the next pause length
    pub fn next_delay(&self, rng: &mut fastrand::Rng) -> Duration {
        if !self.is_enabled() {
            return Duration::ZERO;
        }
        let micros = rng.u64(saturating_micros(self.min)..=saturating_micros(self.max));
        Duration::from_micros(micros)
    }

    /// Sleep the calling thread for the next pause length
    pub fn pause(&self, rng: &mut fastrand::Rng) {
        let delay = self.next_delay(rng);
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

fn saturating_micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}
