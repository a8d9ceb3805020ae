// Key binding tables

use super::action::{self, Action, InputSource};
use std::collections::HashMap;

/// One table of key to action bindings
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Build a table from (key, action) pairs; a key listed twice keeps its last action
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        let mut config = Self::default();
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    pub fn bind(&mut self, source: InputSource, action: Action) {
        if let Some(previous) = self.bindings.insert(source, action) {
            log::debug!("{:?} rebound from {:?} to {:?}", source, previous, action);
        }
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }
}

/// Bindings for every player, plus the keys that belong to nobody
///
/// Player tables only ever route fighter actions; Pause lives in the
/// global table and never reaches a player's input state.
#[derive(Debug)]
pub struct InputConfigManager {
    players: Vec<InputConfig>,
    global: InputConfig,
}

impl InputConfigManager {
    /// Default layouts for up to two players; extra players start unbound
    pub fn new(max_players: usize) -> Self {
        let players = (0..max_players)
            .map(|player_id| {
                let defaults = match player_id {
                    0 => action::default_p1_bindings(),
                    1 => action::default_p2_bindings(),
                    _ => Vec::new(),
                };
                InputConfig::from_bindings(defaults)
            })
            .collect();

        Self {
            players,
            global: InputConfig::from_bindings(action::global_bindings()),
        }
    }

    /// The action `source` triggers for one player, ignoring global keys
    pub fn player_action(&self, player_id: usize, source: InputSource) -> Option<Action> {
        self.players
            .get(player_id)
            .and_then(|config| config.get_action(source))
    }

    /// The global action `source` triggers, if any
    pub fn global_action(&self, source: InputSource) -> Option<Action> {
        self.global.get_action(source)
    }
}

impl Default for InputConfigManager {
    fn default() -> Self {
        Self::new(2)
    }
}
