// Physics for fighters: per-tick Euler motion, ground snapping and box overlap
//
// All quantities are expressed per tick rather than per second, so the
// simulation speed follows the tick rate of the game loop.

mod collision;
mod motion;

pub use collision::{boxes_overlap, to_aabb};
pub use motion::{integrate, GravityField, GroundContact};
