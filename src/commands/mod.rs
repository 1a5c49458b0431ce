//! Command handlers for the CLI application.
//!
//! This module organizes command handlers by category:
//! - `query`: Read-only commands (info, brightness, firmware, serial, mode)
//! - `set`: Setting commands (set-brightness, set-mode, effect, frame)
//! - `utility`: Utility commands (list, config, version, attr)

pub mod query;
pub mod set;
pub mod utility;

use std::str::FromStr;

use anyhow::{Context as _, Result};
use razer_chroma::ChromaDevice;
use razer_transport::{HidDiscovery, OutputFormat, PacketFilter, PrinterConfig};

use chroma_driver::DriverConfig;

/// Result type for command handlers
pub type CommandResult = Result<()>;

/// Everything a command handler needs besides its own arguments
pub struct Context {
    pub config: DriverConfig,
    pub json: bool,
    printer_config: Option<PrinterConfig>,
}

impl Context {
    pub fn new(config: DriverConfig, json: bool, filter: Option<&str>) -> Result<Self> {
        let printer_config = create_printer_config(config.monitor, config.show_hex, json, filter)?;
        Ok(Self {
            config,
            json,
            printer_config,
        })
    }

    pub fn discovery(&self) -> HidDiscovery {
        match &self.printer_config {
            Some(config) => HidDiscovery::with_printer_config(config.clone()),
            None => HidDiscovery::new(),
        }
    }

    /// Open the preferred device and bind it to its profile.
    /// If monitoring is enabled, the transport is wrapped with PrinterTransport.
    pub fn open_device(&self) -> Result<ChromaDevice> {
        let transport = self
            .discovery()
            .open_first(self.config.product_id)
            .context("No supported device found")?;
        let device = ChromaDevice::open(transport)?;
        let wait = self.config.wait_window(device.wait());
        Ok(device.with_wait(wait))
    }
}

/// Create printer config from CLI flags
pub fn create_printer_config(
    monitor: bool,
    hex: bool,
    json: bool,
    filter: Option<&str>,
) -> Result<Option<PrinterConfig>> {
    if !monitor {
        return Ok(None);
    }

    let filter = match filter {
        Some(f) => PacketFilter::from_str(f).map_err(anyhow::Error::msg)?,
        None => PacketFilter::All,
    };
    let format = if json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    Ok(Some(
        PrinterConfig::default()
            .with_hex(hex)
            .with_filter(filter)
            .with_format(format),
    ))
}

/// Print a value either as JSON or through its Display form
pub fn emit<T: serde::Serialize + std::fmt::Display>(json: bool, value: &T) -> CommandResult {
    if json {
        println!("{}", serde_json::to_string(value)?);
    } else {
        println!("{value}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printer_config_disabled_without_monitor() {
        assert!(create_printer_config(false, true, true, Some("matrix"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_printer_config_from_flags() {
        let config = create_printer_config(true, true, true, Some("class=0x0f"))
            .unwrap()
            .unwrap();
        assert!(config.show_hex);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.filter, PacketFilter::Class(0x0F));
    }

    #[test]
    fn test_printer_config_bad_filter() {
        assert!(create_printer_config(true, false, false, Some("nope")).is_err());
    }
}
