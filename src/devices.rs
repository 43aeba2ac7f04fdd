//! Known device models and physical key naming.
//!
//! All supported keypads share vendor ID 0x1189 and the same report
//! protocol; they differ in key/knob population and in whether the
//! firmware actually applies configuration writes.

use crate::protocol::{self, KEYS_PER_KNOB, KNOB_FIRST_KEY};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceDefinition {
    pub vendor_id: u16,
    pub product_id: u16,
    pub display_name: &'static str,
    pub key_count: u8,
    pub knob_count: u8,
    /// False for models whose firmware accepts configuration writes
    /// but never applies them.
    pub config_supported: bool,
}

pub const SUPPORTED_DEVICES: &[DeviceDefinition] = &[
    DeviceDefinition {
        vendor_id: protocol::VENDOR_ID,
        product_id: 0x8890,
        display_name: "12-key 2-knob macro keypad",
        key_count: 12,
        knob_count: 2,
        config_supported: true,
    },
    DeviceDefinition {
        vendor_id: protocol::VENDOR_ID,
        product_id: 0x8840,
        display_name: "12-key 2-knob macro keypad (variant firmware)",
        key_count: 12,
        knob_count: 2,
        config_supported: false,
    },
];

pub fn find_device(vendor_id: u16, product_id: u16) -> Option<&'static DeviceDefinition> {
    SUPPORTED_DEVICES
        .iter()
        .find(|def| def.vendor_id == vendor_id && def.product_id == product_id)
}

pub fn is_supported(vendor_id: u16, product_id: u16) -> bool {
    find_device(vendor_id, product_id).is_some()
}

impl DeviceDefinition {
    /// Whether this model populates the given physical key number.
    pub fn has_physical_key(&self, key: u8) -> bool {
        if key == 0 {
            return false;
        }
        if key <= protocol::REGULAR_KEY_MAX {
            return key <= self.key_count;
        }
        if !(KNOB_FIRST_KEY..=protocol::PHYSICAL_KEY_MAX).contains(&key) {
            return false;
        }
        (key - KNOB_FIRST_KEY) / KEYS_PER_KNOB < self.knob_count
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown physical key {0:?} (expected 1-18, key1-key12, or knob names like knob1_press)")]
pub struct ParsePhysicalKeyError(pub String);

/// Parse a physical key reference.
///
/// Accepted forms: a bare number (`14`), a regular key name (`key5`),
/// or a knob action (`knob1_press`, `k2_cw`). Knob directions: `ccw`
/// or `left`, `press` or `click`, `cw` or `right`.
pub fn parse_physical_key(input: &str) -> Result<u8, ParsePhysicalKeyError> {
    let err = || ParsePhysicalKeyError(input.to_string());
    let name = input.trim().to_ascii_lowercase();

    if let Ok(n) = name.parse::<u8>() {
        return if (protocol::PHYSICAL_KEY_MIN..=protocol::PHYSICAL_KEY_MAX).contains(&n) {
            Ok(n)
        } else {
            Err(err())
        };
    }

    if let Some(rest) = name.strip_prefix("key") {
        return match rest.parse::<u8>() {
            Ok(n) if (1..=protocol::REGULAR_KEY_MAX).contains(&n) => Ok(n),
            _ => Err(err()),
        };
    }

    let rest = name
        .strip_prefix("knob")
        .or_else(|| name.strip_prefix('k'))
        .ok_or_else(err)?;
    let (knob, direction) = rest.split_once('_').ok_or_else(err)?;
    let knob: u8 = match knob.parse() {
        Ok(n) if n >= 1 => n,
        _ => return Err(err()),
    };
    let offset = match direction {
        "left" | "ccw" => 0,
        "press" | "click" => 1,
        "right" | "cw" => 2,
        _ => return Err(err()),
    };
    let key = KNOB_FIRST_KEY as u16 + (knob as u16 - 1) * KEYS_PER_KNOB as u16 + offset;
    if key <= protocol::PHYSICAL_KEY_MAX as u16 {
        Ok(key as u8)
    } else {
        Err(err())
    }
}

/// Display name for a physical key number, the inverse of
/// [`parse_physical_key`] for canonical names.
pub fn physical_key_name(key: u8) -> String {
    if (KNOB_FIRST_KEY..=protocol::PHYSICAL_KEY_MAX).contains(&key) {
        let idx = key - KNOB_FIRST_KEY;
        let knob = idx / KEYS_PER_KNOB + 1;
        let direction = match idx % KEYS_PER_KNOB {
            0 => "ccw",
            1 => "press",
            _ => "cw",
        };
        format!("knob{knob}_{direction}")
    } else {
        format!("key{key}")
    }
}
