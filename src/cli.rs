// CLI definitions using clap

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "turbokeys")]
#[command(author, version, about = "Configure cheap CH55x-based USB mini macro keypads")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List attached keypads and their HID interfaces
    #[command(visible_aliases = ["ls", "l"])]
    List,

    /// Show the attached keypad and its negotiated report ID
    #[command(visible_alias = "i")]
    Info,

    /// Bind a key spec to a physical key
    ///
    /// KEY is a number (1-18), key1-key12, or a knob action such as
    /// knob1_press or k2_cw. SPEC is zero or more '+'-joined modifiers
    /// followed by a key name: "ctrl+shift+f5", "a", or a media name
    /// like "playpause".
    #[command(visible_alias = "s")]
    Set {
        /// Physical key (e.g. 3, key3, knob1_press)
        key: String,
        /// Key spec (e.g. "ctrl+alt+delete", "volup")
        spec: String,
        /// Target layer
        #[arg(
            short,
            long,
            default_value = "1",
            value_parser = clap::value_parser!(u8).range(1..=3)
        )]
        layer: u8,
    },

    /// Set the backlight mode
    Led {
        /// Mode number or name (0/off, 1/on, 2/breathing)
        mode: String,
    },

    /// Dump raw input reports from all device interfaces
    #[command(visible_alias = "mon")]
    Monitor {
        /// Stop after this many seconds instead of running until Ctrl-C
        #[arg(short, long)]
        time: Option<u64>,
    },
}
