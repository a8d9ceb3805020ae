// Round countdown

use crate::engine::timer::RepeatingTimer;
use std::time::Duration;

/// Default round length in seconds
pub const ROUND_SECONDS: u32 = 60;

/// Whole-second countdown fed with real elapsed time
#[derive(Debug, Clone)]
pub struct MatchClock {
    remaining: u32,
    timer: RepeatingTimer,
}

impl MatchClock {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            timer: RepeatingTimer::new(Duration::from_secs(1)),
        }
    }

    /// Feed elapsed time; returns true on the call that takes the clock to zero
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if self.is_expired() {
            return false;
        }

        let fired = self.timer.advance(elapsed);
        if fired == 0 {
            return false;
        }

        self.remaining = self.remaining.saturating_sub(fired);
        log::trace!("Clock at {}", self.remaining);

        if self.remaining == 0 {
            self.timer.cancel();
            return true;
        }
        false
    }

    /// Freeze the clock where it is
    pub fn stop(&mut self) {
        self.timer.cancel();
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn is_running(&self) -> bool {
        !self.timer.is_cancelled()
    }
}

impl Default for MatchClock {
    fn default() -> Self {
        Self::new(ROUND_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_once_per_second() {
        let mut clock = MatchClock::default();
        assert_eq!(clock.remaining(), 60);

        assert!(!clock.advance(Duration::from_millis(999)));
        assert_eq!(clock.remaining(), 60);
        assert!(!clock.advance(Duration::from_millis(1)));
        assert_eq!(clock.remaining(), 59);
    }

    #[test]
    fn test_sixty_decrements_reach_zero_once() {
        let mut clock = MatchClock::default();
        let mut expirations = 0;

        for _ in 0..60 {
            if clock.advance(Duration::from_secs(1)) {
                expirations += 1;
            }
        }
        assert_eq!(clock.remaining(), 0);
        assert_eq!(expirations, 1);
        assert!(clock.is_expired());
        assert!(!clock.is_running());

        // Never goes below zero or expires twice
        assert!(!clock.advance(Duration::from_secs(5)));
        assert_eq!(clock.remaining(), 0);
    }

    #[test]
    fn test_long_frame_cannot_underflow() {
        let mut clock = MatchClock::new(3);
        assert!(clock.advance(Duration::from_secs(10)));
        assert_eq!(clock.remaining(), 0);
    }

    #[test]
    fn test_stopped_clock_freezes() {
        let mut clock = MatchClock::default();
        clock.advance(Duration::from_secs(5));
        clock.stop();

        assert!(!clock.advance(Duration::from_secs(30)));
        assert_eq!(clock.remaining(), 55);
        assert!(!clock.is_running());
    }
}
