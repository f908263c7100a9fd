//! Logical flight controls and the default keyboard bindings.

use crate::{InputState, KeyCode};

/// Keys bound to each logical control.
#[derive(Debug, Clone)]
pub struct FlightBindings {
    pub pitch_down: Vec<KeyCode>,
    pub pitch_up: Vec<KeyCode>,
    pub roll_left: Vec<KeyCode>,
    pub roll_right: Vec<KeyCode>,
    pub yaw_left: Vec<KeyCode>,
    pub yaw_right: Vec<KeyCode>,
    pub throttle_up: Vec<KeyCode>,
    pub throttle_down: Vec<KeyCode>,
    pub brake: Vec<KeyCode>,
    pub pause: Vec<KeyCode>,
    pub mute: Vec<KeyCode>,
}

impl Default for FlightBindings {
    fn default() -> Self {
        Self {
            pitch_down: vec![KeyCode::KeyW],
            pitch_up: vec![KeyCode::KeyS],
            roll_left: vec![KeyCode::KeyA],
            roll_right: vec![KeyCode::KeyD],
            yaw_left: vec![KeyCode::KeyQ],
            yaw_right: vec![KeyCode::KeyE],
            throttle_up: vec![KeyCode::ShiftLeft, KeyCode::ShiftRight],
            throttle_down: vec![KeyCode::ControlLeft, KeyCode::ControlRight],
            brake: vec![KeyCode::Space],
            pause: vec![KeyCode::KeyP],
            mute: vec![KeyCode::KeyM],
        }
    }
}

/// Control intents for one tick.
///
/// Axes are in `[-1, 1]`; zero means the control is released. Keyboards produce
/// -1/0/1, a gamepad collaborator may write fractional values directly.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightControls {
    /// Positive raises the nose.
    pub pitch: f32,
    /// Positive increases the roll angle.
    pub roll: f32,
    /// Positive increases the yaw angle.
    pub yaw: f32,
    /// Positive opens the throttle.
    pub throttle: f32,
    pub brake: bool,
    /// Edge-triggered: flip pause this tick.
    pub toggle_pause: bool,
    /// Edge-triggered: flip audio mute this tick.
    pub toggle_mute: bool,
}

impl FlightControls {
    /// Read held keys through `bindings`.
    pub fn from_input(input: &InputState, bindings: &FlightBindings) -> Self {
        let axis = |positive: &[KeyCode], negative: &[KeyCode]| -> f32 {
            let mut value = 0.0;
            if input.any_held(positive) {
                value += 1.0;
            }
            if input.any_held(negative) {
                value -= 1.0;
            }
            value
        };

        Self {
            pitch: axis(&bindings.pitch_up, &bindings.pitch_down),
            roll: axis(&bindings.roll_left, &bindings.roll_right),
            yaw: axis(&bindings.yaw_right, &bindings.yaw_left),
            throttle: axis(&bindings.throttle_up, &bindings.throttle_down),
            brake: input.any_held(&bindings.brake),
            toggle_pause: input.any_pressed(&bindings.pause),
            toggle_mute: input.any_pressed(&bindings.mute),
        }
    }

    /// Copy with every axis forced into `[-1, 1]` and NaN treated as released.
    pub fn sanitized(&self) -> Self {
        Self {
            pitch: clamp_axis(self.pitch),
            roll: clamp_axis(self.roll),
            yaw: clamp_axis(self.yaw),
            throttle: clamp_axis(self.throttle),
            ..*self
        }
    }
}

fn clamp_axis(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElementState;

    fn held(keys: &[KeyCode]) -> InputState {
        let mut input = InputState::new();
        for key in keys {
            input.process_keyboard(*key, ElementState::Pressed);
        }
        input
    }

    #[test]
    fn default_bindings_map_keyboard_axes() {
        let bindings = FlightBindings::default();
        let input = held(&[KeyCode::KeyW, KeyCode::KeyA, KeyCode::KeyE, KeyCode::ShiftRight]);
        let controls = FlightControls::from_input(&input, &bindings);
        assert_eq!(controls.pitch, -1.0);
        assert_eq!(controls.roll, 1.0);
        assert_eq!(controls.yaw, 1.0);
        assert_eq!(controls.throttle, 1.0);
        assert!(!controls.brake);
    }

    #[test]
    fn opposing_keys_cancel() {
        let bindings = FlightBindings::default();
        let input = held(&[KeyCode::KeyW, KeyCode::KeyS, KeyCode::Space]);
        let controls = FlightControls::from_input(&input, &bindings);
        assert_eq!(controls.pitch, 0.0);
        assert!(controls.brake);
    }

    #[test]
    fn pause_toggle_only_on_press_frame() {
        let bindings = FlightBindings::default();
        let mut input = held(&[KeyCode::KeyP]);
        assert!(FlightControls::from_input(&input, &bindings).toggle_pause);
        input.begin_frame();
        assert!(!FlightControls::from_input(&input, &bindings).toggle_pause);
    }

    #[test]
    fn sanitized_clamps_analog_axes() {
        let controls = FlightControls { pitch: 3.0, roll: f32::NAN, yaw: -0.25, ..Default::default() };
        let clean = controls.sanitized();
        assert_eq!(clean.pitch, 1.0);
        assert_eq!(clean.roll, 0.0);
        assert_eq!(clean.yaw, -0.25);
    }
}
