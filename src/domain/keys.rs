//! Key combination value objects

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error when parsing a key combination string
#[derive(Debug, Clone, Error)]
pub enum KeyComboParseError {
    #[error("Empty key combination")]
    Empty,

    #[error("Key combination \"{input}\" has no base key (modifiers alone cannot trigger)")]
    MissingBaseKey { input: String },

    #[error("Key combination \"{input}\" has more than one base key: \"{first}\" and \"{second}\"")]
    MultipleBaseKeys {
        input: String,
        first: String,
        second: String,
    },

    #[error("Unknown key \"{token}\" in combination \"{input}\"")]
    UnknownKey { input: String, token: String },
}

/// Modifier flags for a key combination.
/// `meta` covers the Windows/Super/Command key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Ctrl only
    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };

    /// True if no modifier flag is set
    pub fn is_empty(&self) -> bool {
        !(self.ctrl || self.alt || self.shift || self.meta)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (set, name) in [
            (self.ctrl, "ctrl"),
            (self.alt, "alt"),
            (self.shift, "shift"),
            (self.meta, "meta"),
        ] {
            if set {
                if !first {
                    write!(f, "+")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Named base keys accepted in combinations, beyond single letters and digits
/// and the function keys f1..f24.
const NAMED_KEYS: &[&str] = &[
    "space",
    "enter",
    "tab",
    "backspace",
    "escape",
    "delete",
    "insert",
    "home",
    "end",
    "pageup",
    "pagedown",
    "up",
    "down",
    "left",
    "right",
    "capslock",
    "minus",
    "equal",
    "comma",
    "period",
    "slash",
    "backslash",
    "semicolon",
    "quote",
    "backquote",
];

/// Check whether a normalized token names a known base key
fn is_known_base_key(token: &str) -> bool {
    if token.len() == 1 && token.chars().all(|c| c.is_ascii_alphanumeric()) {
        return true;
    }
    if let Some(num) = token.strip_prefix('f') {
        if let Ok(n) = num.parse::<u8>() {
            return (1..=24).contains(&n);
        }
    }
    NAMED_KEYS.contains(&token)
}

/// Normalize a key token: lowercase, collapse aliases
fn normalize_token(token: &str) -> String {
    let token = token.trim().to_lowercase();
    match token.as_str() {
        "return" => "enter".to_string(),
        "esc" => "escape".to_string(),
        "del" => "delete".to_string(),
        "spacebar" => "space".to_string(),
        "caps lock" | "caps" => "capslock".to_string(),
        _ => token,
    }
}

/// A set of modifier flags plus exactly one base key.
/// The atomic unit the hotkey listener matches against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    pub modifiers: Modifiers,
    /// Normalized base key token, e.g. "g", "f5", "space"
    pub key: String,
}

impl KeyCombination {
    /// Construct from already-normalized parts. Prefer `FromStr` for
    /// user-supplied strings.
    pub fn new(modifiers: Modifiers, key: impl Into<String>) -> Self {
        Self {
            modifiers,
            key: key.into(),
        }
    }

    /// The reserved quit combination (Ctrl+Q)
    pub fn quit_combination() -> Self {
        Self::new(Modifiers::CTRL, "q")
    }
}

impl FromStr for KeyCombination {
    type Err = KeyComboParseError;

    /// Parse a combination string like "ctrl+shift+g" or "alt+f5".
    /// Modifier order and case are insignificant; exactly one base key
    /// is required.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(KeyComboParseError::Empty);
        }

        let mut modifiers = Modifiers::default();
        let mut base_key: Option<String> = None;

        for part in input.split('+') {
            let token = normalize_token(part);
            match token.as_str() {
                "" => return Err(KeyComboParseError::Empty),
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "altgr" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "meta" | "win" | "super" | "cmd" | "command" => modifiers.meta = true,
                _ => {
                    if !is_known_base_key(&token) {
                        return Err(KeyComboParseError::UnknownKey {
                            input: input.to_string(),
                            token,
                        });
                    }
                    if let Some(first) = base_key {
                        return Err(KeyComboParseError::MultipleBaseKeys {
                            input: input.to_string(),
                            first,
                            second: token,
                        });
                    }
                    base_key = Some(token);
                }
            }
        }

        let key = base_key.ok_or_else(|| KeyComboParseError::MissingBaseKey {
            input: input.to_string(),
        })?;

        Ok(Self { modifiers, key })
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key)
        }
    }
}
