//! Input handling: held-key tracking, flight control intents, and the input mapper.

use std::collections::HashSet;

pub mod controls;
pub mod mapper;

pub use controls::*;
pub use mapper::*;

/// Manages keyboard state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Drop every held key (e.g. when the window loses focus).
    pub fn release_all(&mut self) {
        if !self.keys_held.is_empty() {
            log::debug!("Releasing {} held keys", self.keys_held.len());
        }
        self.keys_released.extend(self.keys_held.drain());
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key was released this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Any of `keys` held.
    pub fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.is_key_held(*k))
    }

    /// Any of `keys` pressed this frame.
    pub fn any_pressed(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.is_key_pressed(*k))
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_reported_once_per_hold() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyP, ElementState::Pressed);
        assert!(input.is_key_pressed(KeyCode::KeyP));
        input.begin_frame();
        // key repeat while held is not a new press
        input.process_keyboard(KeyCode::KeyP, ElementState::Pressed);
        assert!(!input.is_key_pressed(KeyCode::KeyP));
        assert!(input.is_key_held(KeyCode::KeyP));
    }

    #[test]
    fn release_clears_hold() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        input.process_keyboard(KeyCode::KeyW, ElementState::Released);
        assert!(!input.is_key_held(KeyCode::KeyW));
        assert!(input.is_key_released(KeyCode::KeyW));
    }

    #[test]
    fn release_all_drops_held_keys() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::ShiftLeft, ElementState::Pressed);
        input.process_keyboard(KeyCode::KeyA, ElementState::Pressed);
        input.release_all();
        assert!(!input.any_held(&[KeyCode::ShiftLeft, KeyCode::KeyA]));
        assert!(input.is_key_released(KeyCode::KeyA));
    }
}
