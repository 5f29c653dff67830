//! Keyboard state as seen by the simulation
//!
//! The host records key presses into an [`InputState`]; the simulation only
//! reads it, once per frame, through the configured [`KeyBindings`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Held/released state per key identifier (DOM `KeyboardEvent.key` values)
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: HashMap<String, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition; the latest state wins
    pub fn set(&mut self, key: &str, held: bool) {
        match self.keys.get_mut(key) {
            Some(state) => *state = held,
            None => {
                self.keys.insert(key.to_string(), held);
            }
        }
    }

    pub fn press(&mut self, key: &str) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: &str) {
        self.set(key, false);
    }

    /// Unknown keys read as not held
    pub fn is_held(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

/// What a player is asking their paddle to do this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleIntent {
    pub up: bool,
    pub down: bool,
}

/// Key identifiers controlling each paddle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left_up: String,
    pub left_down: String,
    pub right_up: String,
    pub right_down: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left_up: "w".to_string(),
            left_down: "s".to_string(),
            right_up: "ArrowUp".to_string(),
            right_down: "ArrowDown".to_string(),
        }
    }
}

impl KeyBindings {
    pub fn left(&self, input: &InputState) -> PaddleIntent {
        PaddleIntent {
            up: input.is_held(&self.left_up),
            down: input.is_held(&self.left_down),
        }
    }

    pub fn right(&self, input: &InputState) -> PaddleIntent {
        PaddleIntent {
            up: input.is_held(&self.right_up),
            down: input.is_held(&self.right_down),
        }
    }

    /// Whether the key drives any paddle (used to suppress page scrolling)
    pub fn is_bound(&self, key: &str) -> bool {
        [&self.left_up, &self.left_down, &self.right_up, &self.right_down]
            .iter()
            .any(|k| k.as_str() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_state_wins() {
        let mut input = InputState::new();
        input.press("w");
        assert!(input.is_held("w"));
        input.release("w");
        assert!(!input.is_held("w"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut input = InputState::new();
        input.press("F13");
        input.press("q");
        let keys = KeyBindings::default();
        assert_eq!(keys.left(&input), PaddleIntent::default());
        assert_eq!(keys.right(&input), PaddleIntent::default());
        assert!(!keys.is_bound("F13"));
    }

    #[test]
    fn test_bindings_map_to_sides() {
        let mut input = InputState::new();
        input.press("s");
        input.press("ArrowUp");
        let keys = KeyBindings::default();
        assert_eq!(keys.left(&input), PaddleIntent { up: false, down: true });
        assert_eq!(keys.right(&input), PaddleIntent { up: true, down: false });
    }

    #[test]
    fn test_clear_releases_all() {
        let mut input = InputState::new();
        input.press("w");
        input.press("ArrowDown");
        input.clear();
        assert!(!input.is_held("w"));
        assert!(!input.is_held("ArrowDown"));
    }
}
