//! Pure encoders from bindings to the 8-byte report wire format.
//!
//! Layout of basic key configuration reports:
//!
//! ```text
//! Byte 0: physical key number (1-18)
//! Byte 1: layer (upper nibble) | key type (lower nibble)
//! Byte 2: number of keycodes in the sequence
//! Byte 3: sequence index (0 = header, 1..N = keycode packets)
//! Byte 4: modifier bitmask
//! Byte 5: keycode (keycode packets only)
//! ```
//!
//! Media reports carry the function code directly at byte 2. LED
//! reports are addressed to the 0xB0 pseudo-key. Nothing here performs
//! I/O; transmission order is the session's job.

use crate::key_binding::KeyBinding;
use crate::protocol::{self, cmd, key_type};
use thiserror::Error;

/// Fixed 8-byte report payload. The HID report ID is not part of the
/// payload; the device channel prepends it when framing.
pub type Report = [u8; 8];

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    #[error("physical key {0} out of range 1-18")]
    InvalidPhysicalKey(u8),
    #[error("layer {0} out of range 1-3")]
    InvalidLayer(u8),
    /// Mouse actions have no known wire layout.
    #[error("mouse bindings cannot be encoded")]
    UnsupportedClassification,
    #[error("empty keycode sequence")]
    EmptySequence,
    #[error("keycode sequence too long ({0} keycodes, at most 255)")]
    SequenceTooLong(usize),
}

fn check_key(key: u8) -> Result<(), EncodeError> {
    if !(protocol::PHYSICAL_KEY_MIN..=protocol::PHYSICAL_KEY_MAX).contains(&key) {
        return Err(EncodeError::InvalidPhysicalKey(key));
    }
    Ok(())
}

fn check_layer(layer: u8) -> Result<(), EncodeError> {
    if !(protocol::LAYER_MIN..=protocol::LAYER_MAX).contains(&layer) {
        return Err(EncodeError::InvalidLayer(layer));
    }
    Ok(())
}

/// Encode a binding for one physical key on one layer.
///
/// Returns the ordered report set to transmit. LED bindings ignore
/// `key` and `layer`; they are addressed to the LED pseudo-key.
pub fn encode(binding: &KeyBinding, key: u8, layer: u8) -> Result<Vec<Report>, EncodeError> {
    match *binding {
        KeyBinding::Basic { modifiers, code } => {
            encode_key_sequence(key, layer, modifiers, &[code])
        }
        KeyBinding::Media { code } => {
            check_key(key)?;
            check_layer(layer)?;
            let type_byte = protocol::type_byte(layer, key_type::MEDIA);
            Ok(vec![[key, type_byte, code, 0, 0, 0, 0, 0]])
        }
        KeyBinding::Led { mode } => Ok(vec![encode_led_mode(mode)]),
        KeyBinding::Mouse { .. } => Err(EncodeError::UnsupportedClassification),
    }
}

/// Basic key binding as a header packet plus one packet per keycode.
///
/// A single keycode is the ordinary case; more than one programs the
/// firmware's built-in sequence playback for that key. The header
/// (sequence index 0) must be transmitted before the keycode packets.
pub fn encode_key_sequence(
    key: u8,
    layer: u8,
    modifiers: u8,
    codes: &[u8],
) -> Result<Vec<Report>, EncodeError> {
    check_key(key)?;
    check_layer(layer)?;
    if codes.is_empty() {
        return Err(EncodeError::EmptySequence);
    }
    if codes.len() > u8::MAX as usize {
        return Err(EncodeError::SequenceTooLong(codes.len()));
    }

    let type_byte = protocol::type_byte(layer, key_type::BASIC);
    let count = codes.len() as u8;
    let mut reports = Vec::with_capacity(codes.len() + 1);
    reports.push([key, type_byte, count, 0, modifiers, 0, 0, 0]);
    for (i, &code) in codes.iter().enumerate() {
        reports.push([key, type_byte, count, i as u8 + 1, modifiers, code, 0, 0]);
    }
    Ok(reports)
}

/// Layer switch command. Key writes that follow target this layer.
pub fn encode_layer_switch(layer: u8) -> Result<Report, EncodeError> {
    check_layer(layer)?;
    Ok([cmd::LAYER_SWITCH, layer, 0, 0, 0, 0, 0, 0])
}

/// Flash/save command. `for_led` commits the LED settings bank instead
/// of the key bank.
pub fn encode_flash(for_led: bool) -> Report {
    let bank = if for_led { cmd::FLASH_LED } else { cmd::FLASH_KEYS };
    [cmd::FLASH, bank, 0, 0, 0, 0, 0, 0]
}

/// Backlight mode report. The layer nibble of the type byte is always
/// zero for LED configuration.
pub fn encode_led_mode(mode: u8) -> Report {
    [cmd::LED_ADDR, key_type::LED, mode, 0, 0, 0, 0, 0]
}
