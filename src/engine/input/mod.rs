// Input handling system
//
// Keyboard input for two players sharing one keyboard, with per-player key
// tables and per-tick press detection.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `player`: Per-player input state, including the last pressed direction
// - `config`: Key binding tables, per player and global
// - `manager`: Main input manager coordinating everything
//
// ## Usage Example
//
// ```rust
// use engine::input::{InputManager, Action};
//
// let mut input_manager = InputManager::new(2);
//
// // In your event loop, process keyboard events
// input_manager.process_keyboard_event(&key_event);
//
// // Run a simulation tick that reads the input...
// if let Some(player) = input_manager.player(0) {
//     if player.just_pressed(Action::Attack) {
//         // Fires once per key press, not once per frame held
//     }
// }
//
// // ...then clear the per-tick edges
// input_manager.update();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::{Action, Direction, InputSource};
pub use manager::InputManager;
pub use player::PlayerInput;
