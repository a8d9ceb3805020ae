// Fighter system
//
// This module contains everything related to the two duelists:
// - Fighter entity (movement, health, animation state machine)
// - Fighter presets and their validation
// - Animation states and frame-strip sprites

pub mod animation;
pub mod fighter;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{Animatable, AnimatedSprite, AnimationClip, AnimationSet};
pub use fighter::{AttackBox, Fighter};
pub use state::FighterAnimation;
pub use stats::{ClipSpec, ClipTable, ConfigError, FighterConfig, KENJI, SAMURAI_MACK};
