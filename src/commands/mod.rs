//! Command handlers for the CLI application.
//!
//! - `query`: read-only commands (list, info, monitor)
//! - `set`: commands that write to the device (set, led)

pub mod query;
pub mod set;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use turbokeys::hid::{self, HidChannel};

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Open the first supported keypad and run a closure with it.
/// Prints an error and returns Ok(()) if no device can be opened.
pub fn with_channel<F>(f: F) -> CommandResult
where
    F: FnOnce(&mut HidChannel) -> CommandResult,
{
    match hid::open_first() {
        Ok(mut channel) => f(&mut channel),
        Err(e) => {
            eprintln!("Cannot open device: {e}");
            Ok(())
        }
    }
}

/// Set up a Ctrl-C handler that clears the returned flag when
/// triggered. The main loop polls the flag.
pub fn setup_interrupt_handler() -> Arc<AtomicBool> {
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .ok();

    running
}
