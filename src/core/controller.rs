use std::fmt;

/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyQ,
    KeyE,
    KeyC,
    KeyO,
    KeyM,
    KeyR,
    KeyV,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Shift,
    Escape,
}

impl Button {
    /// Label shown next to a control panel button
    pub fn label(&self) -> &'static str {
        match self {
            Button::KeyW => "w",
            Button::KeyA => "a",
            Button::KeyS => "s",
            Button::KeyD => "d",
            Button::KeyQ => "q",
            Button::KeyE => "e",
            Button::KeyC => "c",
            Button::KeyO => "o",
            Button::KeyM => "m",
            Button::KeyR => "r",
            Button::KeyV => "v",
            Button::ArrowUp => "↑",
            Button::ArrowDown => "↓",
            Button::ArrowLeft => "←",
            Button::ArrowRight => "→",
            Button::Space => "Space",
            Button::Shift => "Shift",
            Button::Escape => "Esc",
        }
    }
}

/// Controller - handles button input states
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons
    fn get_down_keys(&self) -> &[Button];
}

/// Modifier keys held alongside a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

/// A key together with the modifiers that must be held for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub button: Button,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    /// Bare key, no modifiers
    pub const fn key(button: Button) -> Self {
        Self {
            button,
            modifiers: Modifiers {
                ctrl: false,
                shift: false,
                alt: false,
            },
        }
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.alt {
            write!(f, "Alt+")?;
        }
        if self.modifiers.shift {
            write!(f, "Shift+")?;
        }
        write!(f, "{}", self.button.label())
    }
}
