use std::collections::HashSet;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller, KeyCombo, Modifiers};

/// Adapter that bridges Winit events to the Controller trait
#[derive(Debug, Clone)]
pub struct WinitController {
    /// Currently pressed buttons
    pressed_keys: HashSet<Button>,
    /// All pressed buttons as a vec (for efficient get_down_keys)
    pressed_vec: Vec<Button>,
    modifiers: Modifiers,
}

impl WinitController {
    /// Create a new WinitController with no pressed keys
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            pressed_vec: Vec::new(),
            modifiers: Modifiers::default(),
        }
    }

    /// Process a Winit WindowEvent and update internal state.
    ///
    /// Returns the combo for a key that just went down; auto-repeat and releases yield `None`.
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<KeyCombo> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                self.modifiers = Modifiers {
                    ctrl: state.control_key(),
                    shift: state.shift_key(),
                    alt: state.alt_key(),
                };
                None
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(keycode) = event.physical_key else {
                    return None;
                };
                let button = Self::keycode_to_button(keycode)?;
                self.set_state(button, event.state)
                    .filter(|_| !event.repeat)
                    .map(|button| self.combo(button))
            }
            WindowEvent::Focused(false) => {
                self.release_all();
                None
            }
            _ => None,
        }
    }

    /// Records a press or release; returns the button if it was newly pressed
    fn set_state(&mut self, button: Button, state: ElementState) -> Option<Button> {
        match state {
            ElementState::Pressed => {
                if self.pressed_keys.insert(button) {
                    self.pressed_vec.push(button);
                    Some(button)
                } else {
                    None
                }
            }
            ElementState::Released => {
                if self.pressed_keys.remove(&button) {
                    self.pressed_vec.retain(|&b| b != button);
                }
                None
            }
        }
    }

    /// Combo for `button` under the modifiers currently held.
    /// Shift as the key itself never counts as its own modifier.
    fn combo(&self, button: Button) -> KeyCombo {
        let mut modifiers = self.modifiers;
        if button == Button::Shift {
            modifiers.shift = false;
        }
        KeyCombo { button, modifiers }
    }

    /// Forget every held key, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
        self.pressed_vec.clear();
        self.modifiers = Modifiers::default();
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Map Winit KeyCode to Button
    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW => Some(Button::KeyW),
            KeyCode::KeyA => Some(Button::KeyA),
            KeyCode::KeyS => Some(Button::KeyS),
            KeyCode::KeyD => Some(Button::KeyD),
            KeyCode::KeyQ => Some(Button::KeyQ),
            KeyCode::KeyE => Some(Button::KeyE),
            KeyCode::KeyC => Some(Button::KeyC),
            KeyCode::KeyO => Some(Button::KeyO),
            KeyCode::KeyM => Some(Button::KeyM),
            KeyCode::KeyR => Some(Button::KeyR),
            KeyCode::KeyV => Some(Button::KeyV),
            KeyCode::ArrowUp => Some(Button::ArrowUp),
            KeyCode::ArrowDown => Some(Button::ArrowDown),
            KeyCode::ArrowLeft => Some(Button::ArrowLeft),
            KeyCode::ArrowRight => Some(Button::ArrowRight),
            KeyCode::Space => Some(Button::Space),
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Button::Shift),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }
}

impl Default for WinitController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed_vec
    }
}
