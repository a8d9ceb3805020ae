// Input manager - Main coordination system for all input

use super::action::{Action, InputSource};
use super::config::InputConfigManager;
use super::player::PlayerInput;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Main input manager that coordinates all input for all players
///
/// Keyboard events write into it between ticks; the match reads it during a
/// tick and [`InputManager::update`] clears the press edges afterwards.
pub struct InputManager {
    /// Configuration manager for all players
    config: InputConfigManager,

    /// Input state for each player
    players: Vec<PlayerInput>,
}

impl InputManager {
    /// Create a new input manager
    pub fn new(max_players: usize) -> Self {
        Self {
            config: InputConfigManager::new(max_players),
            players: (0..max_players).map(|_| PlayerInput::new()).collect(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };

        // Auto-repeat is not a new press
        if event.repeat && event.state == ElementState::Pressed {
            return;
        }

        self.apply(InputSource::key(key_code), event.state);
    }

    /// Route a press or release of `source` to every player bound to it
    ///
    /// Global keys are not routed; ask [`InputManager::global_action`] for those.
    pub fn apply(&mut self, source: InputSource, state: ElementState) {
        for (player_id, player) in self.players.iter_mut().enumerate() {
            let Some(action) = self.config.player_action(player_id, source) else {
                continue;
            };

            match state {
                ElementState::Pressed => player.press(action),
                ElementState::Released => player.release(action),
            }
        }
    }

    /// Clear per-tick press edges for every player
    pub fn update(&mut self) {
        for player in &mut self.players {
            player.update();
        }
    }

    /// Get input state for a specific player
    pub fn player(&self, player_id: usize) -> Option<&PlayerInput> {
        self.players.get(player_id)
    }

    /// The global action bound to `source`, such as Pause
    pub fn global_action(&self, source: InputSource) -> Option<Action> {
        self.config.global_action(source)
    }

    /// Release everything, for when key-up events stop arriving (focus lost)
    pub fn reset_all(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
    }

}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(2)
    }
}
