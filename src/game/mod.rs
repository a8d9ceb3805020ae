// Game rules: fighters, combat, the round clock and the match itself

pub mod arena;
pub mod characters;
pub mod clock;
pub mod combat;
pub mod session;

pub use arena::{Arena, ArenaConfig, DecorConfig};
pub use clock::MatchClock;
pub use combat::{resolve_attack, HitEvent};
pub use session::{EndReason, Match, MatchOutcome, PlayerSlot};
