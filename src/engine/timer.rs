// Repeating wall-clock timer driven by the frame loop

use std::time::Duration;

/// Timer that fires once per interval of fed time
///
/// The timer does not own a thread. The game loop feeds it the real time that
/// passed each frame and it reports how many whole intervals elapsed. Once
/// cancelled it never fires again.
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    interval: Duration,
    accumulated: Duration,
    cancelled: bool,
}

impl RepeatingTimer {
    /// Create a timer that fires once per `interval`
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
            cancelled: false,
        }
    }

    /// Feed elapsed time, returns the number of intervals that completed
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.cancelled || self.interval.is_zero() {
            return 0;
        }

        self.accumulated += elapsed;

        let mut fired = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            fired += 1;
        }
        fired
    }

    /// Stop the timer permanently
    pub fn cancel(&mut self) {
        if !self.cancelled {
            self.cancelled = true;
            self.accumulated = Duration::ZERO;
            log::debug!("Timer cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
