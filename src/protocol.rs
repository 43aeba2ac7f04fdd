// Wire protocol for CH55x-family USB mini macro keypads
// Reverse-engineered from vendor configurator traffic

/// Device identification
pub const VENDOR_ID: u16 = 0x1189;

/// Every report the firmware exchanges is exactly this long. The HID
/// report ID is transport framing, not part of the payload.
pub const REPORT_LEN: usize = 8;

/// Report IDs spoken by known firmware revisions, in probe order.
/// 3 is the current scheme; 0 and 2 are older revisions.
pub const REPORT_ID_CANDIDATES: [u8; 3] = [3, 0, 2];

/// Physical key numbering: 1-12 are regular keys, knob actions follow
/// with three numbers per knob (ccw, press, cw). 13-15 = knob 1,
/// 16-18 = knob 2.
pub const PHYSICAL_KEY_MIN: u8 = 1;
pub const PHYSICAL_KEY_MAX: u8 = 18;
pub const REGULAR_KEY_MAX: u8 = 12;
pub const KNOB_FIRST_KEY: u8 = 13;
pub const KEYS_PER_KNOB: u8 = 3;

/// Layer range selectable on the device.
pub const LAYER_MIN: u8 = 1;
pub const LAYER_MAX: u8 = 3;

/// Leading-byte sentinels for reports not addressed to a physical key.
/// None of these collide with physical key numbers (1-18).
pub mod cmd {
    /// Select the layer that following key writes target.
    pub const LAYER_SWITCH: u8 = 0xA1;
    /// Persist pending configuration to flash.
    pub const FLASH: u8 = 0xAA;
    /// LED configuration is addressed to this pseudo-key.
    pub const LED_ADDR: u8 = 0xB0;

    /// Second byte of the flash report: which settings bank to commit.
    pub const FLASH_KEYS: u8 = 0xAA;
    pub const FLASH_LED: u8 = 0xA1;
}

/// Key type codes carried in the low nibble of the type byte.
pub mod key_type {
    pub const BASIC: u8 = 1;
    pub const MEDIA: u8 = 2;
    pub const MOUSE: u8 = 3;
    pub const LED: u8 = 8;
}

/// Byte 1 of key configuration reports: layer in the upper nibble,
/// key type code in the lower.
pub fn type_byte(layer: u8, key_type: u8) -> u8 {
    (layer << 4) | (key_type & 0x0F)
}

/// HID Usage Table for Keyboard/Keypad (USB HID Usage Tables, Section 10)
pub mod hid {
    /// Resolve a key name to its HID usage code. Case-insensitive;
    /// accepts the common aliases (`esc`, `return`, `pgup`, `del`, ...).
    pub fn usage_from_name(name: &str) -> Option<u8> {
        let code = match name.to_ascii_lowercase().as_str() {
            "a" => 4, "b" => 5, "c" => 6, "d" => 7, "e" => 8, "f" => 9,
            "g" => 10, "h" => 11, "i" => 12, "j" => 13, "k" => 14, "l" => 15,
            "m" => 16, "n" => 17, "o" => 18, "p" => 19, "q" => 20, "r" => 21,
            "s" => 22, "t" => 23, "u" => 24, "v" => 25, "w" => 26, "x" => 27,
            "y" => 28, "z" => 29,
            "1" => 30, "2" => 31, "3" => 32, "4" => 33, "5" => 34,
            "6" => 35, "7" => 36, "8" => 37, "9" => 38, "0" => 39,
            "enter" | "return" => 40,
            "escape" | "esc" => 41,
            "backspace" => 42,
            "tab" => 43,
            "space" => 44,
            "minus" | "-" => 45,
            "equal" | "=" => 46,
            "leftbracket" | "[" => 47,
            "rightbracket" | "]" => 48,
            "backslash" | "\\" => 49,
            "semicolon" | ";" => 51,
            "quote" | "'" => 52,
            "grave" | "`" => 53,
            "comma" | "," => 54,
            "period" | "." => 55,
            "slash" | "/" => 56,
            "capslock" => 57,
            "f1" => 58, "f2" => 59, "f3" => 60, "f4" => 61, "f5" => 62,
            "f6" => 63, "f7" => 64, "f8" => 65, "f9" => 66, "f10" => 67,
            "f11" => 68, "f12" => 69,
            "printscreen" | "prtsc" => 70,
            "scrolllock" => 71,
            // "pause" resolves to the media table first; "break" is the
            // only spelling that reaches the keyboard Pause key.
            "pause" | "break" => 72,
            "insert" => 73,
            "home" => 74,
            "pageup" | "pgup" => 75,
            "delete" | "del" => 76,
            "end" => 77,
            "pagedown" | "pgdn" => 78,
            "right" => 79, "left" => 80, "down" => 81, "up" => 82,
            "numlock" => 83,
            "kp_divide" => 84, "kp_multiply" => 85, "kp_minus" => 86,
            "kp_plus" => 87, "kp_enter" => 88,
            "kp_1" => 89, "kp_2" => 90, "kp_3" => 91, "kp_4" => 92,
            "kp_5" => 93, "kp_6" => 94, "kp_7" => 95, "kp_8" => 96,
            "kp_9" => 97, "kp_0" => 98,
            "kp_period" | "kp_dot" => 99,
            "menu" | "app" => 101,
            _ => return None,
        };
        Some(code)
    }

    /// Display name of a HID usage code. Names lowercase back into
    /// [`usage_from_name`] input (72 prints as `Break` because `pause`
    /// names the media function).
    pub fn key_name(code: u8) -> &'static str {
        match code {
            4 => "A", 5 => "B", 6 => "C", 7 => "D", 8 => "E", 9 => "F",
            10 => "G", 11 => "H", 12 => "I", 13 => "J", 14 => "K", 15 => "L",
            16 => "M", 17 => "N", 18 => "O", 19 => "P", 20 => "Q", 21 => "R",
            22 => "S", 23 => "T", 24 => "U", 25 => "V", 26 => "W", 27 => "X",
            28 => "Y", 29 => "Z",
            30 => "1", 31 => "2", 32 => "3", 33 => "4", 34 => "5",
            35 => "6", 36 => "7", 37 => "8", 38 => "9", 39 => "0",
            40 => "Enter", 41 => "Escape", 42 => "Backspace", 43 => "Tab",
            44 => "Space", 45 => "-", 46 => "=", 47 => "[", 48 => "]",
            49 => "\\", 51 => ";", 52 => "'", 53 => "`", 54 => ",",
            55 => ".", 56 => "/", 57 => "CapsLock",
            58 => "F1", 59 => "F2", 60 => "F3", 61 => "F4", 62 => "F5",
            63 => "F6", 64 => "F7", 65 => "F8", 66 => "F9", 67 => "F10",
            68 => "F11", 69 => "F12",
            70 => "PrintScreen", 71 => "ScrollLock", 72 => "Break",
            73 => "Insert", 74 => "Home", 75 => "PageUp", 76 => "Delete",
            77 => "End", 78 => "PageDown",
            79 => "Right", 80 => "Left", 81 => "Down", 82 => "Up",
            83 => "NumLock",
            84 => "KP_Divide", 85 => "KP_Multiply", 86 => "KP_Minus",
            87 => "KP_Plus", 88 => "KP_Enter",
            89 => "KP_1", 90 => "KP_2", 91 => "KP_3", 92 => "KP_4",
            93 => "KP_5", 94 => "KP_6", 95 => "KP_7", 96 => "KP_8",
            97 => "KP_9", 98 => "KP_0", 99 => "KP_Period",
            101 => "Menu",
            _ => "?",
        }
    }
}

/// Media function codes as the firmware expects them in media reports.
pub mod media {
    /// Resolve a media function name to its wire code.
    pub fn code_from_name(name: &str) -> Option<u8> {
        let code = match name.to_ascii_lowercase().as_str() {
            "play" | "pause" | "playpause" => 205,
            "stop" => 183,
            "prev" | "previous" => 182,
            "next" => 181,
            "mute" => 226,
            "volup" | "volumeup" => 233,
            "voldown" | "volumedown" => 234,
            _ => return None,
        };
        Some(code)
    }

    /// Display name of a media function code.
    pub fn name(code: u8) -> &'static str {
        match code {
            205 => "Play",
            183 => "Stop",
            182 => "Prev",
            181 => "Next",
            226 => "Mute",
            233 => "VolumeUp",
            234 => "VolumeDown",
            _ => "?",
        }
    }
}

/// Backlight modes.
pub mod led {
    /// Mode names, indexed by wire value. Higher values exist on some
    /// firmwares; they pass through numerically.
    pub const MODES: &[&str] = &["Off", "On", "Breathing"];

    pub fn mode_name(mode: u8) -> &'static str {
        MODES.get(mode as usize).unwrap_or(&"Unknown")
    }

    /// Resolve a mode name to its wire value. Case-insensitive.
    pub fn mode_from_name(name: &str) -> Option<u8> {
        let want = name.to_ascii_lowercase();
        MODES
            .iter()
            .position(|m| m.to_ascii_lowercase() == want)
            .map(|i| i as u8)
    }
}
