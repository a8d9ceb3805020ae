// Game loop timing and control
//
// Fixed-rate simulation ticks with variable rendering. Every physics and
// animation constant in the game is expressed per tick, so the tick rate is
// what sets the speed of play, not the display refresh rate.

use std::time::{Duration, Instant};

/// Target simulation rate (60 ticks per second)
pub const TICK_RATE: u32 = 60;
const TICK_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of ticks per frame to prevent spiral of death
const MAX_TICKS_PER_FRAME: u32 = 5;

/// What the caller should do for the frame that just began
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTiming {
    /// Number of simulation ticks to run this frame
    pub ticks: u32,
    /// Real time since the previous frame (zero while paused)
    pub elapsed: Duration,
}

/// Game loop timing state
pub struct GameLoop {
    /// Time not yet consumed by ticks
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Whether the game is paused
    paused: bool,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
        }
    }

    /// Begin a new frame using the current wall-clock time
    pub fn begin_frame(&mut self) -> FrameTiming {
        self.begin_frame_at(Instant::now())
    }

    /// Begin a new frame at an explicit instant
    pub fn begin_frame_at(&mut self, now: Instant) -> FrameTiming {
        let frame_time = now.saturating_duration_since(self.last_frame_time);
        self.last_frame_time = now;

        // Paused time does not count toward ticks or the match clock
        if self.paused {
            return FrameTiming {
                ticks: 0,
                elapsed: Duration::ZERO,
            };
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= TICK_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= TICK_DURATION;
            ticks += 1;
        }

        // Drop the backlog we refused to simulate
        if ticks == MAX_TICKS_PER_FRAME && self.accumulator >= TICK_DURATION {
            log::trace!("Dropping {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        FrameTiming {
            ticks,
            elapsed: frame_time,
        }
    }

    /// Check if game is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the game
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume the game
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Game resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
