// Hit detection between the two fighters

use super::characters::Fighter;
use crate::engine::physics::boxes_overlap;

/// A swing that connected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitEvent {
    pub attacker: &'static str,
    pub defender: &'static str,
    pub remaining_health: i32,
}

/// Whether the attacker's attack box touches the defender's body
pub fn attack_reaches(attacker: &Fighter, defender: &Fighter) -> bool {
    boxes_overlap(&attacker.attack_rect(), &defender.body())
}

/// Check one direction of combat for this tick
///
/// A swing is only judged on the attacker's hit frame. At that frame the
/// swing is spent whether it connects or not, so it lands at most once.
/// Defenders with no health left are not hit again, and an attacker
/// knocked out mid-swing swings at nothing.
pub fn resolve_attack(attacker: &mut Fighter, defender: &mut Fighter) -> Option<HitEvent> {
    if !attacker.is_attacking() || attacker.frame_index() != attacker.hit_frame() {
        return None;
    }

    let connects =
        attacker.health() > 0 && defender.health() > 0 && attack_reaches(attacker, defender);
    attacker.finish_swing();

    if !connects {
        log::trace!("{} swung at nothing", attacker.name());
        return None;
    }

    let remaining_health = defender.take_hit();
    log::debug!(
        "{} hit {} ({} health left)",
        attacker.name(),
        defender.name(),
        remaining_health
    );

    Some(HitEvent {
        attacker: attacker.name(),
        defender: defender.name(),
        remaining_health,
    })
}
