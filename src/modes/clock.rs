//! Tick pacing for the game loops

use std::future::Future;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};

/// Source of simulation ticks
pub trait Clock {
    /// Resolves when the next tick is due
    fn tick(&mut self) -> impl Future<Output = ()>;
}

/// Fixed-rate ticks from a tokio interval
///
/// Must be created inside a tokio runtime. A late tick pushes the schedule
/// back instead of firing a burst to catch up.
pub struct IntervalClock {
    interval: Interval,
}

impl IntervalClock {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

impl Clock for IntervalClock {
    fn tick(&mut self) -> impl Future<Output = ()> {
        async move {
            self.interval.tick().await;
        }
    }
}

/// Ticks as fast as the caller asks
#[derive(Debug, Default, Clone, Copy)]
pub struct Unpaced;

impl Clock for Unpaced {
    fn tick(&mut self) -> impl Future<Output = ()> {
        std::future::ready(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_interval_clock_paces_ticks() {
        let mut clock = IntervalClock::new(Duration::from_millis(20));
        let start = Instant::now();

        // The first tick is immediate, the next two wait a period each.
        for _ in 0..3 {
            clock.tick().await;
        }

        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_unpaced_is_immediate() {
        let mut clock = Unpaced;
        let start = Instant::now();
        for _ in 0..1_000 {
            clock.tick().await;
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
