//! turbokeys CLI
//!
//! Configure key bindings, knob actions, and backlight on cheap
//! CH55x-based USB mini macro keypads (vendor ID 1189).

use clap::Parser;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers (split from main.rs)
mod commands;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        // Default: show device info
        None | Some(Commands::Info) => {
            commands::query::info()?;
        }
        Some(Commands::List) => {
            commands::query::list()?;
        }
        Some(Commands::Set { key, spec, layer }) => {
            commands::set::set(&key, &spec, layer)?;
        }
        Some(Commands::Led { mode }) => {
            commands::set::led(&mode)?;
        }
        Some(Commands::Monitor { time }) => {
            commands::query::monitor(time)?;
        }
    }

    Ok(())
}
