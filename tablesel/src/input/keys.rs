//! Key codes, modifiers and key combinations.

use std::str::FromStr;

use crate::config::ShortcutKey;
use crate::error::KeyParseError;

/// Modifier keys state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control key held
    pub ctrl: bool,
    /// Shift key held
    pub shift: bool,
    /// Alt / Option key held
    pub alt: bool,
    /// Command / Super key held
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is active
    pub fn any(&self) -> bool {
        self.ctrl || self.shift || self.alt || self.meta
    }

    /// Whether the platform multi-select modifier is held.
    pub fn shortcut(&self, key: ShortcutKey) -> bool {
        match key {
            ShortcutKey::Ctrl => self.ctrl,
            ShortcutKey::Meta => self.meta,
        }
    }

    /// Whether a modifier other than Shift and the shortcut key is held.
    /// Such combinations have no table gesture.
    pub fn has_foreign(&self, key: ShortcutKey) -> bool {
        let foreign_shortcut = match key {
            ShortcutKey::Ctrl => self.meta,
            ShortcutKey::Meta => self.ctrl,
        };
        self.alt || foreign_shortcut
    }
}

/// Key codes the table reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Character key
    Char(char),
    /// Space
    Space,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Arrow left
    Left,
    /// Arrow right
    Right,
    /// Home
    Home,
    /// End
    End,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
}

impl Key {
    /// Space may arrive either as its own code or as a character.
    pub fn is_space(&self) -> bool {
        matches!(self, Key::Space | Key::Char(' '))
    }
}

/// A key combination (key + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    /// The key code
    pub key: Key,
    /// Modifier keys
    pub modifiers: Modifiers,
}

impl KeyCombo {
    /// Create a new key combo
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Create a key combo without modifiers
    pub const fn key(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Add ctrl modifier
    pub const fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    /// Add shift modifier
    pub const fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    /// Add alt modifier
    pub const fn alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    /// Add meta modifier
    pub const fn meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }
}

impl std::fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = self.modifiers;
        for (held, name) in [
            (m.ctrl, "Ctrl"),
            (m.meta, "Meta"),
            (m.alt, "Alt"),
            (m.shift, "Shift"),
        ] {
            if held {
                write!(f, "{name}+")?;
            }
        }
        match self.key {
            Key::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            other => write!(f, "{other:?}"),
        }
    }
}

fn parse_key(name: &str) -> Result<Key, KeyParseError> {
    let lower = name.to_ascii_lowercase();
    let key = match lower.as_str() {
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" | "pgup" => Key::PageUp,
        "pagedown" | "pgdn" => Key::PageDown,
        "space" => Key::Space,
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c.to_ascii_lowercase()),
                _ => return Err(KeyParseError::UnknownKey(name.to_string())),
            }
        }
    };
    Ok(key)
}

impl FromStr for KeyCombo {
    type Err = KeyParseError;

    /// Parse strings like `"Down"`, `"Shift+Home"` or `"ctrl+shift+pagedown"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let Some((key_name, modifier_names)) = parts.split_last() else {
            return Err(KeyParseError::Empty);
        };
        if key_name.is_empty() {
            return Err(KeyParseError::Empty);
        }

        let mut modifiers = Modifiers::NONE;
        for name in modifier_names {
            match name.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" | "option" => modifiers.alt = true,
                "meta" | "cmd" | "command" | "super" => modifiers.meta = true,
                _ => return Err(KeyParseError::UnknownModifier(name.to_string())),
            }
        }

        Ok(KeyCombo::new(parse_key(key_name)?, modifiers))
    }
}

// Conversion from crossterm types
impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            meta: mods.intersects(KeyModifiers::SUPER | KeyModifiers::META),
        }
    }
}

impl TryFrom<crossterm::event::KeyCode> for Key {
    type Error = KeyParseError;

    fn try_from(code: crossterm::event::KeyCode) -> Result<Self, Self::Error> {
        use crossterm::event::KeyCode;
        let key = match code {
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            other => return Err(KeyParseError::Unsupported(format!("{other:?}"))),
        };
        Ok(key)
    }
}

impl TryFrom<crossterm::event::KeyEvent> for KeyCombo {
    type Error = KeyParseError;

    fn try_from(event: crossterm::event::KeyEvent) -> Result<Self, Self::Error> {
        Ok(KeyCombo::new(
            Key::try_from(event.code)?,
            Modifiers::from(event.modifiers),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modifiers_any_order() {
        let combo: KeyCombo = "shift+Ctrl+PageDown".parse().unwrap();
        assert_eq!(combo, KeyCombo::key(Key::PageDown).ctrl().shift());
    }

    #[test]
    fn test_parse_char_is_lowercased() {
        let combo: KeyCombo = "Ctrl+A".parse().unwrap();
        assert_eq!(combo, KeyCombo::key(Key::Char('a')).ctrl());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<KeyCombo>(), Err(KeyParseError::Empty));
        assert_eq!(
            "Hyper+Down".parse::<KeyCombo>(),
            Err(KeyParseError::UnknownModifier("Hyper".into()))
        );
        assert_eq!(
            "Shift+Banana".parse::<KeyCombo>(),
            Err(KeyParseError::UnknownKey("Banana".into()))
        );
    }

    #[test]
    fn test_display_round_trips() {
        let combo = KeyCombo::key(Key::Home).ctrl().shift();
        assert_eq!(combo.to_string(), "Ctrl+Shift+Home");
        assert_eq!(combo.to_string().parse::<KeyCombo>(), Ok(combo));
    }

    #[test]
    fn test_crossterm_conversion() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
        let event = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::CONTROL);
        assert_eq!(
            KeyCombo::try_from(event),
            Ok(KeyCombo::key(Key::Space).ctrl())
        );
        let event = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        assert!(KeyCombo::try_from(event).is_err());
    }
}
