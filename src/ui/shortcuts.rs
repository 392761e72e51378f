//! Global keyboard navigation.
//!
//! Two kinds of bindings:
//!
//! | Keys             | Effect                                              |
//! |------------------|-----------------------------------------------------|
//! | Ctrl+K / Cmd+K   | open the command palette (works in text fields too) |
//! | `/`              | open the command palette                            |
//! | `g` then `c`     | Kontakte (list)                                     |
//! | `g` then `o`     | Opportunitäten (board)                              |
//! | `g` then `a`     | Artikel (new)                                       |
//! | `g` then `e`     | Mitarbeiter (list)                                  |
//!
//! Plain-letter bindings are ignored while a text field owns focus.
//!
//! Pressing `g` arms a [`PendingSequence`]: a single-shot subscription that
//! sees the very next key event before any other binding does and is
//! consumed by it, whatever that key is. Arming while one is pending replaces
//! it, so at most one is ever alive.

use crate::model::Module;
use crate::ui::route::Route;
use std::fmt;
use std::str::FromStr;

pub const PALETTE: &str = "Ctrl+K";
pub const PALETTE_ALT: &str = "/";
pub const GOTO_CONTACTS: &str = "g c";
pub const GOTO_OPPS: &str = "g o";
pub const GOTO_ARTICLES: &str = "g a";
pub const GOTO_EMPLOYEES: &str = "g e";

const GOTO_PREFIX: char = 'g';

/// Second key of a `g` sequence → target module.
pub fn goto_target(key: char) -> Option<Module> {
    match key.to_ascii_lowercase() {
        'c' => Some(Module::Contacts),
        'o' => Some(Module::Opps),
        'a' => Some(Module::Articles),
        'e' => Some(Module::Employees),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn none(&self) -> bool {
        !(self.ctrl || self.meta || self.alt)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Up,
    Down,
    Backspace,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub mods: Modifiers,
}

impl KeyEvent {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            mods: Modifiers::default(),
        }
    }

    pub fn char(ch: char) -> Self {
        Self::plain(Key::Char(ch))
    }

    pub fn ctrl(ch: char) -> Self {
        Self {
            key: Key::Char(ch),
            mods: Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
        }
    }

    fn plain_char(&self) -> Option<char> {
        match self.key {
            Key::Char(ch) if self.mods.none() => Some(ch),
            _ => None,
        }
    }

    fn is_palette_chord(&self) -> bool {
        matches!(self.key, Key::Char(ch) if ch.eq_ignore_ascii_case(&'k'))
            && (self.mods.ctrl || self.mods.meta)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    #[error("empty key")]
    Empty,
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

impl FromStr for KeyEvent {
    type Err = KeyParseError;

    /// Parses `c`, `/`, `ctrl+k`, `cmd+k`, `esc`, `enter`, `up`, `down`, `backspace`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }
        // A lone "+" is a key, not a separator.
        let (mod_parts, key_part) = match s.rsplit_once('+') {
            Some((mods, key)) if !key.is_empty() => (Some(mods), key),
            _ => (None, s),
        };

        let mut mods = Modifiers::default();
        if let Some(mod_parts) = mod_parts {
            for m in mod_parts.split('+') {
                match m.to_ascii_lowercase().as_str() {
                    "ctrl" | "control" => mods.ctrl = true,
                    "cmd" | "meta" | "super" => mods.meta = true,
                    "alt" | "option" => mods.alt = true,
                    "shift" => mods.shift = true,
                    other => return Err(KeyParseError::UnknownModifier(other.to_string())),
                }
            }
        }

        let key = match key_part.to_ascii_lowercase().as_str() {
            "enter" | "return" => Key::Enter,
            "esc" | "escape" => Key::Esc,
            "up" => Key::Up,
            "down" => Key::Down,
            "backspace" | "bs" => Key::Backspace,
            "space" => Key::Char(' '),
            _ => {
                let mut chars = key_part.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Key::Char(ch),
                    _ => return Err(KeyParseError::UnknownKey(key_part.to_string())),
                }
            }
        };
        Ok(Self { key, mods })
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.ctrl {
            f.write_str("ctrl+")?;
        }
        if self.mods.meta {
            f.write_str("cmd+")?;
        }
        if self.mods.alt {
            f.write_str("alt+")?;
        }
        if self.mods.shift {
            f.write_str("shift+")?;
        }
        match self.key {
            Key::Char(ch) => write!(f, "{ch}"),
            Key::Enter => f.write_str("enter"),
            Key::Esc => f.write_str("esc"),
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
            Key::Backspace => f.write_str("backspace"),
        }
    }
}

/// Who currently owns keyboard focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Page,
    /// A text field is consuming printable keys.
    TextInput,
}

/// Armed second-key listener of a `g` sequence.
///
/// [`PendingSequence::fire`] takes `self` by value, so a subscription can
/// observe at most one key.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingSequence {
    serial: u64,
}

impl PendingSequence {
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Consume the subscription with the next key event.
    pub fn fire(self, event: &KeyEvent) -> Option<Module> {
        event.plain_char().and_then(goto_target)
    }
}

/// What a key event asks the host to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    OpenPalette,
    Navigate(Route),
    /// Not a global binding; the focused element may still use it.
    Unhandled,
}

#[derive(Debug, Default)]
pub struct KeyDispatcher {
    pending: Option<PendingSequence>,
    armed_total: u64,
}

impl KeyDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of `g` listeners ever armed (diagnostics).
    pub fn armed_total(&self) -> u64 {
        self.armed_total
    }

    /// Drop any armed sequence without firing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    fn arm(&mut self) {
        self.armed_total += 1;
        self.pending = Some(PendingSequence {
            serial: self.armed_total,
        });
    }

    pub fn dispatch(&mut self, event: &KeyEvent, focus: Focus) -> KeyCommand {
        // The armed listener observes this key before any other binding.
        if let Some(pending) = self.pending.take() {
            let serial = pending.serial();
            match pending.fire(event) {
                Some(module) => {
                    tracing::debug!(serial, %module, "goto sequence");
                    return KeyCommand::Navigate(Route::module(module));
                }
                None => tracing::debug!(serial, key = %event, "goto sequence dropped"),
            }
        }

        if event.is_palette_chord() {
            return KeyCommand::OpenPalette;
        }
        if focus == Focus::TextInput {
            return KeyCommand::Unhandled;
        }
        match event.plain_char() {
            Some('/') => KeyCommand::OpenPalette,
            Some(ch) if ch.eq_ignore_ascii_case(&GOTO_PREFIX) => {
                self.arm();
                KeyCommand::Unhandled
            }
            _ => KeyCommand::Unhandled,
        }
    }
}
