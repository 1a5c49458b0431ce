// CLI definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chroma-driver")]
#[command(author, version, about = "Razer Chroma HDK Linux Driver")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable transport monitoring (prints all requests/responses)
    #[arg(long, global = true)]
    pub monitor: bool,

    /// Show raw hex dump alongside decoded output
    #[arg(long, global = true)]
    pub hex: bool,

    /// JSON output (monitor lines and query results)
    #[arg(long, global = true)]
    pub json: bool,

    /// Filter monitor output (all, standard, matrix, class=0xNN, cmd=0xNN)
    #[arg(long, global = true)]
    pub filter: Option<String>,

    /// Config file path (default: ~/.config/razer-chroma/driver.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    // === Utility Commands ===
    /// List attached devices
    #[command(visible_alias = "ls")]
    List,

    /// Show device type, firmware, serial and mode
    #[command(visible_alias = "i")]
    Info,

    /// Print the effective configuration
    Config {
        /// Write the effective configuration back to the config file
        #[arg(long)]
        save: bool,
    },

    /// Print the driver version
    #[command(visible_alias = "ver")]
    Version,

    /// Read or write a device attribute by name
    ///
    /// Attributes: matrix_brightness, firmware_version, device_type,
    /// device_serial, device_mode, matrix_effect_none, matrix_effect_spectrum,
    /// matrix_effect_static, matrix_effect_breath, matrix_effect_custom,
    /// matrix_custom_frame, version
    Attr {
        /// Attribute name
        name: String,
        /// Value to write, as hex bytes (e.g. "ff0000"); omit to read
        value: Option<String>,
        /// Write VALUE as text instead of hex (e.g. matrix_brightness 200)
        #[arg(long)]
        ascii: bool,
    },

    // === Query Commands ===
    /// Get matrix brightness (0-255)
    #[command(visible_alias = "b")]
    Brightness,

    /// Get firmware version
    #[command(visible_alias = "fw")]
    Firmware,

    /// Get serial number
    Serial,

    /// Get device type name
    DeviceType,

    /// Get device mode (mode:param)
    Mode,

    // === Set Commands ===
    /// Set matrix brightness
    #[command(visible_alias = "sb")]
    SetBrightness {
        /// Brightness (0-255)
        value: u8,
    },

    /// Set device mode (0 = normal, 3 = driver)
    #[command(visible_alias = "sm")]
    SetMode {
        mode: u8,
        #[arg(default_value = "0")]
        param: u8,
    },

    /// Set a lighting effect
    #[command(visible_alias = "e")]
    Effect {
        #[command(subcommand)]
        effect: EffectCommands,
    },

    /// Send one row of a custom frame and display it
    ///
    /// Colours fill consecutive columns starting at START.
    Frame {
        /// Row ID (0-3)
        row: u8,
        /// First column
        start: u8,
        /// Colours as RRGGBB, #RRGGBB or r,g,b
        #[arg(required = true)]
        colors: Vec<String>,
    },

    /// Send a raw custom frame buffer (row start stop rgb... repeated)
    FrameRaw {
        /// Frame buffer as hex bytes
        buffer: String,
        /// Do not switch to custom-frame mode afterwards
        #[arg(long)]
        no_activate: bool,
    },
}

#[derive(Subcommand)]
pub enum EffectCommands {
    /// Turn all LEDs off
    None,
    /// Cycle through the spectrum
    Spectrum,
    /// Single static colour
    Static {
        /// Colour as RRGGBB, #RRGGBB or r,g,b
        color: String,
    },
    /// Breathing: no colour = random, one = single, two = dual
    Breath {
        #[arg(num_args = 0..=2)]
        colors: Vec<String>,
    },
    /// Show the custom frame buffer
    Custom,
}
