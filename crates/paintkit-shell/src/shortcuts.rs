//! Keyboard shortcuts.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const HELP_TEXT: &str = "This is a basic image editor. You can open, edit, and save images.\n\
Pick a tool, then press, drag and release on the canvas to draw with it.\n\
Ctrl+Z undo, Ctrl+Y redo, Ctrl+S save as, Ctrl+H this help.";

/// Shell commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Undo,
    Redo,
    SaveAs,
    Help,
}

/// A key plus modifiers, e.g. `ctrl+z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Lowercase key character.
    pub key: char,
}

impl KeyChord {
    pub const fn ctrl(key: char) -> Self {
        Self {
            ctrl: true,
            shift: false,
            alt: false,
            key,
        }
    }
}

impl FromStr for KeyChord {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chord = KeyChord {
            ctrl: false,
            shift: false,
            alt: false,
            key: '\0',
        };
        let lowered = s.trim().to_ascii_lowercase();
        let mut parts = lowered.split('+').peekable();
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let mut chars = part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => chord.key = c,
                    _ => return Err(format!("Invalid key '{}'", part)),
                }
            } else {
                match part {
                    "ctrl" | "control" => chord.ctrl = true,
                    "shift" => chord.shift = true,
                    "alt" => chord.alt = true,
                    other => return Err(format!("Unknown modifier '{}'", other)),
                }
            }
        }
        if chord.key == '\0' {
            return Err(format!("Invalid key chord '{}'", s.trim()));
        }
        Ok(chord)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }
        write!(f, "{}", self.key.to_ascii_uppercase())
    }
}

/// Chord to action bindings.
#[derive(Debug, Clone)]
pub struct ShortcutMap {
    bindings: HashMap<KeyChord, Action>,
}

impl Default for ShortcutMap {
    fn default() -> Self {
        let mut map = Self {
            bindings: HashMap::new(),
        };
        map.bind(KeyChord::ctrl('z'), Action::Undo);
        map.bind(KeyChord::ctrl('y'), Action::Redo);
        map.bind(KeyChord::ctrl('s'), Action::SaveAs);
        map.bind(KeyChord::ctrl('h'), Action::Help);
        map
    }
}

impl ShortcutMap {
    /// Bind `chord`, replacing any previous binding.
    pub fn bind(&mut self, chord: KeyChord, action: Action) -> Option<Action> {
        self.bindings.insert(chord, action)
    }

    pub fn lookup(&self, chord: &KeyChord) -> Option<Action> {
        self.bindings.get(chord).copied()
    }
}
