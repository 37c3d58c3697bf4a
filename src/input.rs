//! Gesture inputs: keys and modifier flags, plus adapters from Slint events.
//!
//! The engine never talks to an event loop. Callers translate whatever their
//! platform delivers into these types; [`Key::from_text`] and
//! [`PointerModifiers::from_button`] cover the Slint side.

use slint::platform::{Key as SlintKey, PointerEventButton};
use slint::SharedString;

use crate::traverse::Direction;

/// Keys the gesture controller distinguishes. Anything else is carried as
/// [`Key::Char`] and forwarded to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Plus,
    Minus,
    Escape,
    Space,
    Enter,
    Menu,
    Char(char),
}

impl Key {
    /// The navigation direction for arrow keys.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }

    /// Translate the text of a Slint key event.
    ///
    /// Slint encodes special keys as private-use characters; see
    /// [`slint::platform::Key`]. Returns `None` for empty or multi-character text.
    pub fn from_text(text: &str) -> Option<Key> {
        let mut chars = text.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }

        const SPECIAL: [(SlintKey, Key); 7] = [
            (SlintKey::UpArrow, Key::Up),
            (SlintKey::DownArrow, Key::Down),
            (SlintKey::LeftArrow, Key::Left),
            (SlintKey::RightArrow, Key::Right),
            (SlintKey::Escape, Key::Escape),
            (SlintKey::Return, Key::Enter),
            (SlintKey::Menu, Key::Menu),
        ];
        for (slint_key, key) in SPECIAL {
            if SharedString::from(slint_key).as_str() == text {
                return Some(key);
            }
        }

        Some(match c {
            ' ' => Key::Space,
            '\n' | '\r' => Key::Enter,
            '+' => Key::Plus,
            '-' => Key::Minus,
            other => Key::Char(other),
        })
    }
}

/// Modifier flags carried by pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerModifiers {
    /// The platform's add/remove-from-selection key (Shift or Ctrl/Cmd).
    pub multi_select: bool,
    pub primary_button: bool,
    pub context_menu_trigger: bool,
    /// Requests that a double-click opens its target in a new window.
    pub open_in_new_window: bool,
}

impl PointerModifiers {
    /// Plain primary-button event without modifiers.
    pub fn primary() -> Self {
        Self {
            primary_button: true,
            ..Self::default()
        }
    }

    /// Primary-button event with the multi-select key held.
    pub fn multi_select() -> Self {
        Self {
            multi_select: true,
            primary_button: true,
            ..Self::default()
        }
    }

    /// Secondary-button event that should post a context menu.
    pub fn context_menu() -> Self {
        Self {
            context_menu_trigger: true,
            ..Self::default()
        }
    }

    /// Build modifiers from a Slint pointer button. The left button is the
    /// primary button and the right button triggers the context menu.
    pub fn from_button(button: PointerEventButton, multi_select: bool) -> Self {
        Self {
            multi_select,
            primary_button: matches!(button, PointerEventButton::Left),
            context_menu_trigger: matches!(button, PointerEventButton::Right),
            open_in_new_window: false,
        }
    }

    /// True for a primary-button event that is not a context-menu trigger.
    pub fn is_button_one(&self) -> bool {
        self.primary_button && !self.context_menu_trigger
    }
}

/// Modifier keys held during a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub control: bool,
}

impl KeyModifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self { shift: true, control: false }
    }

    pub fn control() -> Self {
        Self { shift: false, control: true }
    }
}
