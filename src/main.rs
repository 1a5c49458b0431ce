//! Razer Chroma HDK Driver CLI
//!
//! A command-line interface for controlling the Razer Chroma HDK.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use chroma_driver::DriverConfig;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers (split from main.rs)
mod commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config
    let config_path = cli.config.clone().unwrap_or_else(DriverConfig::default_path);
    let mut config = DriverConfig::load(&config_path)?;
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.monitor |= cli.monitor;
    config.show_hex |= cli.hex;

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    debug!("Config loaded from {:?}", config_path);

    let ctx = commands::Context::new(config, cli.json, cli.filter.as_deref())?;

    match cli.command {
        None | Some(Commands::Info) => commands::query::info(&ctx)?,

        // === Utility Commands ===
        Some(Commands::List) => commands::utility::list(&ctx)?,
        Some(Commands::Config { save }) => commands::utility::config(&ctx, &config_path, save)?,
        Some(Commands::Version) => commands::utility::version(),
        Some(Commands::Attr { name, value, ascii }) => {
            commands::utility::attr(&ctx, &name, value.as_deref(), ascii)?
        }

        // === Query Commands ===
        Some(Commands::Brightness) => commands::query::brightness(&ctx)?,
        Some(Commands::Firmware) => commands::query::firmware(&ctx)?,
        Some(Commands::Serial) => commands::query::serial(&ctx)?,
        Some(Commands::DeviceType) => commands::query::device_type(&ctx)?,
        Some(Commands::Mode) => commands::query::mode(&ctx)?,

        // === Set Commands ===
        Some(Commands::SetBrightness { value }) => commands::set::set_brightness(&ctx, value)?,
        Some(Commands::SetMode { mode, param }) => commands::set::set_mode(&ctx, mode, param)?,
        Some(Commands::Effect { effect }) => commands::set::effect(&ctx, effect)?,
        Some(Commands::Frame { row, start, colors }) => {
            commands::set::frame(&ctx, row, start, &colors)?
        }
        Some(Commands::FrameRaw {
            buffer,
            no_activate,
        }) => commands::set::frame_raw(&ctx, &buffer, !no_activate)?,
    }

    Ok(())
}
