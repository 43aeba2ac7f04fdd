//! Read-only command handlers.

use super::{setup_interrupt_handler, with_channel, CommandResult};
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};
use turbokeys::hid;
use turbokeys::Session;

/// List attached keypads and their HID interfaces
pub fn list() -> CommandResult {
    let interfaces = hid::enumerate()?;
    if interfaces.is_empty() {
        println!("No supported keypads attached.");
        return Ok(());
    }

    let mut last_model = None;
    for iface in &interfaces {
        let model = (iface.definition.vendor_id, iface.definition.product_id);
        if last_model != Some(model) {
            let product = iface.product.as_deref().unwrap_or(iface.definition.display_name);
            print!("{product} [{:04x}:{:04x}]", model.0, model.1);
            if !iface.definition.config_supported {
                print!(" (firmware does not apply configuration)");
            }
            println!();
            last_model = Some(model);
        }
        println!(
            "  interface {:2}  page {:04x}  usage {:04x}  {}",
            iface.interface, iface.usage_page, iface.usage, iface.path
        );
    }
    Ok(())
}

/// Show the attached keypad and its negotiated report ID
pub fn info() -> CommandResult {
    with_channel(|channel| {
        let definition = channel.definition();
        println!(
            "Device:     {} ({:04x}:{:04x})",
            definition.display_name, definition.vendor_id, definition.product_id
        );
        println!(
            "Layout:     {} keys, {} knobs",
            definition.key_count, definition.knob_count
        );
        println!(
            "Interface:  {} (usage page {:04x})",
            channel.interface(),
            channel.usage_page()
        );
        if !definition.config_supported {
            println!("Note:       firmware accepts configuration writes but does not apply them");
        }

        let mut session = Session::new(channel);
        match session.report_id() {
            Ok(id) => println!("Report ID:  {id}"),
            Err(e) => println!("Report ID:  negotiation failed ({e})"),
        }
        Ok(())
    })
}

/// Dump raw input reports from every interface of the first keypad
pub fn monitor(seconds: Option<u64>) -> CommandResult {
    let channels = hid::open_monitor_channels()?;
    println!(
        "Monitoring {} interface(s); press Ctrl-C to stop.",
        channels.len()
    );
    for (label, channel) in &channels {
        println!("  {label} (interface {})", channel.interface());
    }

    let running = setup_interrupt_handler();
    let deadline = seconds.map(|s| Instant::now() + Duration::from_secs(s));

    while running.load(Ordering::SeqCst) {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                break;
            }
        }
        for (label, channel) in &channels {
            match channel.read_report(10) {
                Ok(Some(data)) => println!("[{label}] {data:02x?}"),
                Ok(None) => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}
