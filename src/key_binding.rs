//! Key binding representation for the configuration protocol.
//!
//! [`KeyBinding`] is the canonical result of parsing a key-spec string.
//! Tokens are separated by `+`; the last token is the key or media
//! function, everything before it must be a modifier name.
//!
//! # Parsing syntax
//!
//! ```text
//! c              → Basic(code 6)
//! Ctrl+C         → Basic(Ctrl, code 6)
//! ctrl+shift+esc → Basic(Ctrl|Shift, code 41)
//! volup          → Media(233)
//! playpause      → Media(205)
//! ```
//!
//! Media function names win over key names, so `pause` is Play/Pause
//! and `break` is the keyboard Pause key. Modifiers in front of a media
//! function are accepted and dropped; the wire format has no place for
//! them.

use crate::protocol::{hid, key_type, led, media};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Modifier bitmask constants (byte 4 of basic key reports).
///
/// The device uses the same bit order as the USB HID modifier byte:
/// left-hand modifiers in the low nibble, right-hand in the high.
pub mod mods {
    pub const CTRL: u8 = 0x01;
    pub const SHIFT: u8 = 0x02;
    pub const ALT: u8 = 0x04;
    pub const WIN: u8 = 0x08;
    pub const RCTRL: u8 = 0x10;
    pub const RSHIFT: u8 = 0x20;
    pub const RALT: u8 = 0x40;
    pub const RWIN: u8 = 0x80;
}

/// What a physical key is bound to.
///
/// Implements [`FromStr`] for parsing human-readable syntax and
/// [`Display`] for printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    /// Ordinary keyboard key, optionally with modifiers held.
    ///
    /// `modifiers` uses the bits from the [`mods`] module; `code` is a
    /// USB HID usage code.
    Basic { modifiers: u8, code: u8 },
    /// Media/consumer function (volume, playback control).
    Media { code: u8 },
    /// Mouse action. The wire layout is not known; the encoder rejects
    /// this variant.
    Mouse { button: u8 },
    /// Backlight mode change.
    Led { mode: u8 },
}

impl KeyBinding {
    /// Key type code for the low nibble of the report type byte.
    pub fn key_type_code(&self) -> u8 {
        match self {
            KeyBinding::Basic { .. } => key_type::BASIC,
            KeyBinding::Media { .. } => key_type::MEDIA,
            KeyBinding::Mouse { .. } => key_type::MOUSE,
            KeyBinding::Led { .. } => key_type::LED,
        }
    }
}

/// Error type for parsing a [`KeyBinding`] from a string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseBindingError {
    #[error("unknown key: {0:?}")]
    UnknownKey(String),
    #[error("unknown modifier: {0:?}")]
    UnknownModifier(String),
}

/// Parse a modifier name to its bitmask value.
pub fn parse_modifier(name: &str) -> Option<u8> {
    match name.to_ascii_lowercase().as_str() {
        "ctrl" | "control" | "lctrl" => Some(mods::CTRL),
        "shift" | "lshift" => Some(mods::SHIFT),
        "alt" | "lalt" | "option" => Some(mods::ALT),
        "win" | "gui" | "super" | "meta" | "cmd" | "lwin" => Some(mods::WIN),
        "rctrl" | "rcontrol" => Some(mods::RCTRL),
        "rshift" => Some(mods::RSHIFT),
        "ralt" | "altgr" => Some(mods::RALT),
        "rwin" | "rgui" | "rsuper" | "rcmd" => Some(mods::RWIN),
        _ => None,
    }
}

impl FromStr for KeyBinding {
    type Err = ParseBindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('+').collect();

        // All but the last token must be modifiers. Duplicates just OR
        // into the same bit.
        let mut modifiers = 0u8;
        for &part in &parts[..parts.len() - 1] {
            let part = part.trim();
            modifiers |= parse_modifier(part)
                .ok_or_else(|| ParseBindingError::UnknownModifier(part.to_string()))?;
        }

        let base = parts.last().unwrap_or(&"").trim();

        if let Some(code) = media::code_from_name(base) {
            // No modifier byte in media reports; drop whatever was given.
            return Ok(KeyBinding::Media { code });
        }
        if let Some(code) = hid::usage_from_name(base) {
            return Ok(KeyBinding::Basic { modifiers, code });
        }
        Err(ParseBindingError::UnknownKey(base.to_string()))
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyBinding::Basic { modifiers, code } => {
                let mod_names: &[(u8, &str)] = &[
                    (mods::CTRL, "Ctrl"),
                    (mods::SHIFT, "Shift"),
                    (mods::ALT, "Alt"),
                    (mods::WIN, "Win"),
                    (mods::RCTRL, "RCtrl"),
                    (mods::RSHIFT, "RShift"),
                    (mods::RALT, "RAlt"),
                    (mods::RWIN, "RWin"),
                ];
                for &(bit, name) in mod_names {
                    if modifiers & bit != 0 {
                        write!(f, "{name}+")?;
                    }
                }
                write!(f, "{}", hid::key_name(*code))
            }
            KeyBinding::Media { code } => write!(f, "{}", media::name(*code)),
            KeyBinding::Mouse { button } => write!(f, "Mouse{button}"),
            KeyBinding::Led { mode } => write!(f, "Led({})", led::mode_name(*mode)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- FromStr tests ---

    #[test]
    fn parse_plain_key() {
        assert_eq!(
            "a".parse::<KeyBinding>().unwrap(),
            KeyBinding::Basic {
                modifiers: 0,
                code: 4
            }
        );
        assert_eq!(
            "Escape".parse::<KeyBinding>().unwrap(),
            KeyBinding::Basic {
                modifiers: 0,
                code: 41
            }
        );
        assert_eq!(
            "f12".parse::<KeyBinding>().unwrap(),
            KeyBinding::Basic {
                modifiers: 0,
                code: 69
            }
        );
    }

    #[test]
    fn parse_combo() {
        assert_eq!(
            "ctrl+c".parse::<KeyBinding>().unwrap(),
            KeyBinding::Basic {
                modifiers: mods::CTRL,
                code: 6
            }
        );
        assert_eq!(
            "ctrl+shift+escape".parse::<KeyBinding>().unwrap(),
            KeyBinding::Basic {
                modifiers: mods::CTRL | mods::SHIFT,
                code: 41
            }
        );
        assert_eq!(
            "win+tab".parse::<KeyBinding>().unwrap(),
            KeyBinding::Basic {
                modifiers: mods::WIN,
                code: 43
            }
        );
        assert_eq!(
            "rctrl+rshift+a".parse::<KeyBinding>().unwrap(),
            KeyBinding::Basic {
                modifiers: mods::RCTRL | mods::RSHIFT,
                code: 4
            }
        );
    }

    #[test]
    fn parse_is_case_insensitive() {
        let lower: KeyBinding = "ctrl+c".parse().unwrap();
        assert_eq!("CTRL+C".parse::<KeyBinding>().unwrap(), lower);
        assert_eq!("Ctrl+c".parse::<KeyBinding>().unwrap(), lower);
    }

    #[test]
    fn parse_trims_token_whitespace() {
        assert_eq!(
            " ctrl + shift + c ".parse::<KeyBinding>().unwrap(),
            "ctrl+shift+c".parse::<KeyBinding>().unwrap()
        );
    }

    #[test]
    fn parse_duplicate_modifiers_idempotent() {
        assert_eq!(
            "ctrl+ctrl+c".parse::<KeyBinding>().unwrap(),
            "ctrl+c".parse::<KeyBinding>().unwrap()
        );
    }

    #[test]
    fn parse_media() {
        assert_eq!(
            "volup".parse::<KeyBinding>().unwrap(),
            KeyBinding::Media { code: 233 }
        );
        assert_eq!(
            "playpause".parse::<KeyBinding>().unwrap(),
            KeyBinding::Media { code: 205 }
        );
        assert_eq!(
            "stop".parse::<KeyBinding>().unwrap(),
            KeyBinding::Media { code: 183 }
        );
    }

    #[test]
    fn parse_media_shadows_basic_pause() {
        // "pause" is the media function; the Pause key is "break".
        assert_eq!(
            "pause".parse::<KeyBinding>().unwrap(),
            KeyBinding::Media { code: 205 }
        );
        assert_eq!(
            "break".parse::<KeyBinding>().unwrap(),
            KeyBinding::Basic {
                modifiers: 0,
                code: 72
            }
        );
    }

    #[test]
    fn parse_media_drops_modifiers() {
        assert_eq!(
            "ctrl+volup".parse::<KeyBinding>().unwrap(),
            KeyBinding::Media { code: 233 }
        );
    }

    #[test]
    fn parse_punctuation() {
        assert_eq!(
            "-".parse::<KeyBinding>().unwrap(),
            KeyBinding::Basic {
                modifiers: 0,
                code: 45
            }
        );
        assert_eq!(
            "ctrl+=".parse::<KeyBinding>().unwrap(),
            KeyBinding::Basic {
                modifiers: mods::CTRL,
                code: 46
            }
        );
    }

    #[test]
    fn parse_error_unknown_key() {
        assert_eq!(
            "foobar".parse::<KeyBinding>().unwrap_err(),
            ParseBindingError::UnknownKey("foobar".into())
        );
        assert!("".parse::<KeyBinding>().is_err());
    }

    #[test]
    fn parse_error_unknown_modifier() {
        assert_eq!(
            "hyper+a".parse::<KeyBinding>().unwrap_err(),
            ParseBindingError::UnknownModifier("hyper".into())
        );
        // A key name in modifier position is an error too.
        assert_eq!(
            "ctrl+c+x".parse::<KeyBinding>().unwrap_err(),
            ParseBindingError::UnknownModifier("c".into())
        );
    }

    #[test]
    fn parse_modifier_aliases() {
        assert_eq!(parse_modifier("control"), Some(mods::CTRL));
        assert_eq!(parse_modifier("GUI"), Some(mods::WIN));
        assert_eq!(parse_modifier("super"), Some(mods::WIN));
        assert_eq!(parse_modifier("altgr"), Some(mods::RALT));
        assert_eq!(parse_modifier("hyper"), None);
    }

    // --- Display tests ---

    #[test]
    fn display_basic() {
        let b: KeyBinding = "ctrl+shift+escape".parse().unwrap();
        assert_eq!(b.to_string(), "Ctrl+Shift+Escape");
        let plain: KeyBinding = "q".parse().unwrap();
        assert_eq!(plain.to_string(), "Q");
    }

    #[test]
    fn display_media() {
        assert_eq!(KeyBinding::Media { code: 233 }.to_string(), "VolumeUp");
        assert_eq!(KeyBinding::Media { code: 205 }.to_string(), "Play");
    }

    #[test]
    fn display_led() {
        assert_eq!(KeyBinding::Led { mode: 2 }.to_string(), "Led(Breathing)");
    }

    #[test]
    fn parse_display_roundtrip() {
        let cases = [
            "a",
            "escape",
            "f3",
            "ctrl+c",
            "ctrl+shift+f4",
            "win+tab",
            "volup",
            "mute",
            "stop",
        ];
        for input in cases {
            let binding: KeyBinding = input.parse().unwrap();
            let displayed = binding.to_string();
            let reparsed: KeyBinding = displayed.parse().unwrap();
            assert_eq!(binding, reparsed, "roundtrip failed for {input:?}");
        }
    }

    // --- Type code tests ---

    #[test]
    fn key_type_codes() {
        let basic: KeyBinding = "a".parse().unwrap();
        assert_eq!(basic.key_type_code(), key_type::BASIC);
        let media: KeyBinding = "mute".parse().unwrap();
        assert_eq!(media.key_type_code(), key_type::MEDIA);
        assert_eq!(KeyBinding::Mouse { button: 1 }.key_type_code(), 3);
        assert_eq!(KeyBinding::Led { mode: 0 }.key_type_code(), 8);
    }
}
