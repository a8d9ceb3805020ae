// Per-player input state management

use super::action::{Action, Direction};
use std::collections::HashSet;

/// Held keys and press edges for one player
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions that are currently held
    pressed: HashSet<Action>,

    /// Actions pressed since the last tick consumed input
    just_pressed: HashSet<Action>,

    /// Horizontal direction whose key went down most recently
    last_direction: Option<Direction>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action went down since the last tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Direction the player is steering this tick
    ///
    /// Only the most recently pressed direction counts, and only while its key
    /// is still held. Holding both keys therefore moves toward the last one
    /// pressed, and releasing it stops movement even if the other key is
    /// still down.
    pub fn horizontal_intent(&self) -> Option<Direction> {
        self.last_direction
            .filter(|direction| self.is_pressed(direction.action()))
    }

    /// Register an action press
    pub(crate) fn press(&mut self, action: Action) {
        if let Some(direction) = action.direction() {
            self.last_direction = Some(direction);
        }

        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Clear per-tick edges
    /// Call this after every simulation tick that read the input
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
    }

    /// Forget every held key, e.g. when key-up events can no longer arrive
    pub(crate) fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.last_direction = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_input_creation() {
        let input = PlayerInput::new();
        assert!(!input.is_pressed(Action::Jump));
        assert_eq!(input.horizontal_intent(), None);
    }

    #[test]
    fn test_press_and_release() {
        let mut input = PlayerInput::new();
        input.press(Action::Attack);
        assert!(input.is_pressed(Action::Attack));
        assert!(input.just_pressed(Action::Attack));

        input.update();
        input.release(Action::Attack);
        assert!(!input.is_pressed(Action::Attack));
        assert!(!input.just_pressed(Action::Attack));
    }

    #[test]
    fn test_just_pressed_fires_once_per_press() {
        let mut input = PlayerInput::new();
        input.press(Action::Attack);
        input.update();

        // Still held, but the edge is gone
        input.press(Action::Attack);
        assert!(input.is_pressed(Action::Attack));
        assert!(!input.just_pressed(Action::Attack));
    }

    #[test]
    fn test_last_direction_wins() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveLeft);
        input.press(Action::MoveRight);
        assert_eq!(input.horizontal_intent(), Some(Direction::Right));

        input.press(Action::MoveLeft);
        assert_eq!(input.horizontal_intent(), Some(Direction::Left));
    }

    #[test]
    fn test_releasing_last_direction_stops_movement() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveLeft);
        input.press(Action::MoveRight);
        input.release(Action::MoveRight);

        // Left is still held but was not the last key pressed
        assert!(input.is_pressed(Action::MoveLeft));
        assert_eq!(input.horizontal_intent(), None);
    }

    #[test]
    fn test_non_direction_press_keeps_direction() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveRight);
        input.press(Action::Jump);
        assert_eq!(input.horizontal_intent(), Some(Direction::Right));
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveLeft);
        input.press(Action::Attack);
        input.reset();

        assert!(!input.is_pressed(Action::MoveLeft));
        assert!(!input.just_pressed(Action::Attack));
        assert_eq!(input.horizontal_intent(), None);
    }
}
