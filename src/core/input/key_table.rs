//=========================================================================
// Key Table
//=========================================================================
//
// Immutable mapping from human-readable key names to `KeyCode`s.
//
// Lookup: "space" → KeyCode::Space (code 32). Unknown names resolve to
// `None`; name-based queries treat that as "never pressed".
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::str::FromStr;

//=== Internal Dependencies ===============================================

use super::event::KeyCode;

//=== Table ===============================================================

static KEY_TABLE: &[(&str, KeyCode)] = &[
    ("backspace", KeyCode::Backspace),
    ("tab", KeyCode::Tab),
    ("enter", KeyCode::Enter),
    ("shift", KeyCode::Shift),
    ("ctrl", KeyCode::Ctrl),
    ("alt", KeyCode::Alt),
    ("pausebreak", KeyCode::PauseBreak),
    ("capslock", KeyCode::CapsLock),
    ("escape", KeyCode::Escape),
    ("space", KeyCode::Space),
    ("pageup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("end", KeyCode::End),
    ("home", KeyCode::Home),
    ("left", KeyCode::ArrowLeft),
    ("up", KeyCode::ArrowUp),
    ("right", KeyCode::ArrowRight),
    ("down", KeyCode::ArrowDown),
    ("insert", KeyCode::Insert),
    ("delete", KeyCode::Delete),
    ("0", KeyCode::Digit0),
    ("1", KeyCode::Digit1),
    ("2", KeyCode::Digit2),
    ("3", KeyCode::Digit3),
    ("4", KeyCode::Digit4),
    ("5", KeyCode::Digit5),
    ("6", KeyCode::Digit6),
    ("7", KeyCode::Digit7),
    ("8", KeyCode::Digit8),
    ("9", KeyCode::Digit9),
    ("a", KeyCode::KeyA),
    ("b", KeyCode::KeyB),
    ("c", KeyCode::KeyC),
    ("d", KeyCode::KeyD),
    ("e", KeyCode::KeyE),
    ("f", KeyCode::KeyF),
    ("g", KeyCode::KeyG),
    ("h", KeyCode::KeyH),
    ("i", KeyCode::KeyI),
    ("j", KeyCode::KeyJ),
    ("k", KeyCode::KeyK),
    ("l", KeyCode::KeyL),
    ("m", KeyCode::KeyM),
    ("n", KeyCode::KeyN),
    ("o", KeyCode::KeyO),
    ("p", KeyCode::KeyP),
    ("q", KeyCode::KeyQ),
    ("r", KeyCode::KeyR),
    ("s", KeyCode::KeyS),
    ("t", KeyCode::KeyT),
    ("u", KeyCode::KeyU),
    ("v", KeyCode::KeyV),
    ("w", KeyCode::KeyW),
    ("x", KeyCode::KeyX),
    ("y", KeyCode::KeyY),
    ("z", KeyCode::KeyZ),
    ("lmeta", KeyCode::LeftMeta),
    ("rmeta", KeyCode::RightMeta),
    ("select", KeyCode::Select),
    ("pad_0", KeyCode::Pad0),
    ("pad_1", KeyCode::Pad1),
    ("pad_2", KeyCode::Pad2),
    ("pad_3", KeyCode::Pad3),
    ("pad_4", KeyCode::Pad4),
    ("pad_5", KeyCode::Pad5),
    ("pad_6", KeyCode::Pad6),
    ("pad_7", KeyCode::Pad7),
    ("pad_8", KeyCode::Pad8),
    ("pad_9", KeyCode::Pad9),
    ("multiply", KeyCode::Multiply),
    ("add", KeyCode::Add),
    ("subtract", KeyCode::Subtract),
    ("divide", KeyCode::Divide),
    ("f1", KeyCode::F1),
    ("f2", KeyCode::F2),
    ("f3", KeyCode::F3),
    ("f4", KeyCode::F4),
    ("f5", KeyCode::F5),
    ("f6", KeyCode::F6),
    ("f7", KeyCode::F7),
    ("f8", KeyCode::F8),
    ("f9", KeyCode::F9),
    ("f10", KeyCode::F10),
    ("f11", KeyCode::F11),
    ("f12", KeyCode::F12),
    ("numlock", KeyCode::NumLock),
    ("scrolllock", KeyCode::ScrollLock),
    ("semicolon", KeyCode::Semicolon),
    ("equals", KeyCode::Equals),
    ("comma", KeyCode::Comma),
    ("dash", KeyCode::Dash),
    ("period", KeyCode::Period),
    ("forwardslash", KeyCode::ForwardSlash),
    ("tilde", KeyCode::Tilde),
    ("openbrace", KeyCode::OpenBrace),
    ("backslash", KeyCode::Backslash),
    ("closebrace", KeyCode::CloseBrace),
    ("quote", KeyCode::Quote),
];

//=== Lookups =============================================================

impl KeyCode {
    /// Resolves a symbolic key name (`"a"`, `"space"`, `"pad_3"`).
    pub fn from_name(name: &str) -> Option<KeyCode> {
        KEY_TABLE
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, key)| *key)
    }

    /// Returns the symbolic name, or `None` for `Unidentified`.
    pub fn name(self) -> Option<&'static str> {
        KEY_TABLE
            .iter()
            .find(|(_, key)| *key == self)
            .map(|(entry, _)| *entry)
    }

    /// All named keys, in table order.
    pub fn named() -> impl Iterator<Item = (&'static str, KeyCode)> {
        KEY_TABLE.iter().copied()
    }
}

//=== UnknownKeyName ======================================================

/// Returned when parsing a name that isn't in the key table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyName(pub String);

impl fmt::Display for UnknownKeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown key name: '{}'", self.0)
    }
}

impl std::error::Error for UnknownKeyName {}

impl FromStr for KeyCode {
    type Err = UnknownKeyName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyCode::from_name(s).ok_or_else(|| UnknownKeyName(s.to_owned()))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn resolves_known_names() {
        assert_eq!(KeyCode::from_name("a"), Some(KeyCode::KeyA));
        assert_eq!(KeyCode::from_name("space"), Some(KeyCode::Space));
        assert_eq!(KeyCode::from_name("left"), Some(KeyCode::ArrowLeft));
        assert_eq!(KeyCode::from_name("pad_5"), Some(KeyCode::Pad5));
        assert_eq!(KeyCode::from_name("f10"), Some(KeyCode::F10));
    }

    #[test]
    fn resolved_codes_match_device_codes() {
        assert_eq!(KeyCode::from_name("enter").map(KeyCode::code), Some(13));
        assert_eq!(KeyCode::from_name("z").map(KeyCode::code), Some(90));
        assert_eq!(KeyCode::from_name("tilde").map(KeyCode::code), Some(192));
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(KeyCode::from_name("hyper"), None);
        assert_eq!(KeyCode::from_name("A"), None, "Names are lowercase");
    }

    #[test]
    fn parse_reports_unknown_name() {
        let err = "nope".parse::<KeyCode>().unwrap_err();
        assert_eq!(err, UnknownKeyName("nope".into()));
        assert_eq!("q".parse::<KeyCode>(), Ok(KeyCode::KeyQ));
    }

    #[test]
    fn table_has_no_duplicates() {
        let names: HashSet<_> = KeyCode::named().map(|(n, _)| n).collect();
        let codes: HashSet<_> = KeyCode::named().map(|(_, k)| k).collect();
        assert_eq!(names.len(), KEY_TABLE.len());
        assert_eq!(codes.len(), KEY_TABLE.len());
    }

    #[test]
    fn name_round_trips() {
        for (name, key) in KeyCode::named() {
            assert_eq!(key.name(), Some(name));
        }
        assert_eq!(KeyCode::Unidentified.name(), None);
    }
}
