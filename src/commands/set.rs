//! Command handlers that write to the device.

use super::{with_channel, CommandResult};
use anyhow::bail;
use turbokeys::devices::{parse_physical_key, physical_key_name};
use turbokeys::protocol::led;
use turbokeys::{KeyBinding, Session};

/// Bind a key spec to a physical key on the given layer
pub fn set(key: &str, spec: &str, layer: u8) -> CommandResult {
    // Parse before touching the device so bad input never opens it.
    let key = parse_physical_key(key)?;
    let binding: KeyBinding = spec.parse()?;

    with_channel(|channel| {
        let definition = channel.definition();
        if !definition.has_physical_key(key) {
            bail!(
                "{} has no physical key {} ({})",
                definition.display_name,
                key,
                physical_key_name(key)
            );
        }
        warn_unsupported(definition);

        let mut session = Session::new(channel);
        session.apply_binding(key, layer, &binding)?;
        println!(
            "Set {} to {} on layer {}",
            physical_key_name(key),
            binding,
            layer
        );
        Ok(())
    })
}

/// Set the backlight mode
pub fn led(mode: &str) -> CommandResult {
    let mode = resolve_led_mode(mode)?;

    with_channel(|channel| {
        warn_unsupported(channel.definition());

        let mut session = Session::new(channel);
        session.apply_led_mode(mode)?;
        println!("Set backlight to {} ({})", led::mode_name(mode), mode);
        Ok(())
    })
}

fn warn_unsupported(definition: &turbokeys::DeviceDefinition) {
    if !definition.config_supported {
        eprintln!(
            "Warning: {} firmware is not known to apply configuration writes; sending anyway",
            definition.display_name
        );
    }
}

fn resolve_led_mode(input: &str) -> anyhow::Result<u8> {
    if let Ok(n) = input.trim().parse::<u8>() {
        if (n as usize) < led::MODES.len() {
            return Ok(n);
        }
        bail!("LED mode {} out of range 0-{}", n, led::MODES.len() - 1);
    }
    match led::mode_from_name(input.trim()) {
        Some(mode) => Ok(mode),
        None => bail!("unknown LED mode {input:?} (expected 0-2, off, on, or breathing)"),
    }
}
