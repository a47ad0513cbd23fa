//! Clock implementations.

use crate::infrastructure::ports::ClockPort;
use chrono::{DateTime, Duration, Utc};
use std::sync::{Mutex, PoisonError};

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Development clock - the first reading is the start instant, and every
/// reading after that is one step later.
///
/// With an hourly step and a one-second refresh interval the board sweeps a
/// whole day in 24 seconds.
pub struct SimulatedClock {
    current: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl SimulatedClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            current: Mutex::new(start),
            step,
        }
    }

    pub fn hourly(start: DateTime<Utc>) -> Self {
        Self::new(start, Duration::hours(1))
    }
}

impl ClockPort for SimulatedClock {
    fn now(&self) -> DateTime<Utc> {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        let now = *current;
        *current += self.step;
        now
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn simulated_clock_starts_at_start_then_advances_one_step_per_reading() {
        let start = Utc.with_ymd_and_hms(2024, 6, 15, 22, 0, 0).unwrap();
        let clock = SimulatedClock::hourly(start);

        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), Utc.with_ymd_and_hms(2024, 6, 15, 23, 0, 0).unwrap());
        assert_eq!(clock.now(), Utc.with_ymd_and_hms(2024, 6, 16, 0, 0, 0).unwrap());
    }

    #[test]
    fn fixed_clock_never_moves() {
        let at = Utc.with_ymd_and_hms(2024, 6, 15, 14, 0, 0).unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.now(), clock.now());
    }
}
