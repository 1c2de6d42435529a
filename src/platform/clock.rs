//! Frame pacing

use std::time::{Duration, Instant};

use super::Pacer;

/// Sleeps until the next tick deadline. Falls back to "now" instead of
/// bursting through missed ticks when it gets more than two periods behind.
#[derive(Debug)]
pub struct FixedRateClock {
    period: Duration,
    next_tick: Instant,
}

impl FixedRateClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_tick: Instant::now(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Pacer for FixedRateClock {
    fn wait_for_next_tick(&mut self) {
        self.next_tick += self.period;
        let now = Instant::now();
        if self.next_tick > now {
            std::thread::sleep(self.next_tick - now);
        } else if now - self.next_tick > self.period * 2 {
            log::debug!("Tick deadline missed by {:?}, resetting", now - self.next_tick);
            self.next_tick = now;
        }
    }

    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
        self.next_tick = Instant::now();
    }
}

/// No real waiting. Counts ticks and records requested pauses; used for
/// headless batch runs and tests.
#[derive(Debug, Default)]
pub struct Unpaced {
    pub ticks: u64,
    pub pauses: Vec<Duration>,
}

impl Pacer for Unpaced {
    fn wait_for_next_tick(&mut self) {
        self.ticks += 1;
    }

    fn pause(&mut self, duration: Duration) {
        self.pauses.push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_period_from_settings() {
        let settings = crate::Settings {
            tick_rate_hz: 100,
            ..Default::default()
        };
        let clock = FixedRateClock::new(settings.tick_duration());
        assert_eq!(clock.period(), Duration::from_millis(10));
    }

    #[test]
    fn test_clock_waits_for_deadlines() {
        let start = Instant::now();
        let mut clock = FixedRateClock::new(Duration::from_millis(2));
        for _ in 0..3 {
            clock.wait_for_next_tick();
        }
        assert!(start.elapsed() >= Duration::from_millis(6));
    }

    #[test]
    fn test_clock_resets_when_far_behind() {
        let mut clock = FixedRateClock::new(Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));
        let before = Instant::now();
        clock.wait_for_next_tick();
        // Deadline moved up to the present instead of replaying missed ticks
        assert!(clock.next_tick >= before);
    }

    #[test]
    fn test_unpaced_records() {
        let mut pacer = Unpaced::default();
        pacer.wait_for_next_tick();
        pacer.pause(Duration::from_millis(5));
        assert_eq!(pacer.ticks, 1);
        assert_eq!(pacer.pauses, vec![Duration::from_millis(5)]);
    }
}
