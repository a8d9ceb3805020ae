// Fighter animation states

use std::fmt;

/// The closed set of animations every fighter owns
///
/// Switching between them is gated by [`crate::game::characters::Fighter::switch_animation`];
/// this enum only knows which states commit the fighter to finishing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FighterAnimation {
    /// Standing still on the ground
    #[default]
    Idle,
    /// Moving horizontally
    Run,
    /// Rising (negative vertical velocity)
    Jump,
    /// Falling (positive vertical velocity)
    Fall,
    /// The one attack swing
    Attack1,
    /// Flinching after being hit
    TakeHit,
    /// Knocked out
    Death,
}

impl FighterAnimation {
    pub const COUNT: usize = 7;

    /// Every animation, in table order
    pub const ALL: [FighterAnimation; Self::COUNT] = [
        Self::Idle,
        Self::Run,
        Self::Jump,
        Self::Fall,
        Self::Attack1,
        Self::TakeHit,
        Self::Death,
    ];

    /// Position of this animation in [`FighterAnimation::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Run => 1,
            Self::Jump => 2,
            Self::Fall => 3,
            Self::Attack1 => 4,
            Self::TakeHit => 5,
            Self::Death => 6,
        }
    }

    /// Get the display name for this animation
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Run => "run",
            Self::Jump => "jump",
            Self::Fall => "fall",
            Self::Attack1 => "attack1",
            Self::TakeHit => "takeHit",
            Self::Death => "death",
        }
    }

    /// Animations that must reach their last frame before anything else may play
    pub const fn is_committed(self) -> bool {
        matches!(self, Self::Attack1 | Self::TakeHit)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Death)
    }
}

impl fmt::Display for FighterAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
