//! Driver configuration
//!
//! Stored as TOML at `~/.config/razer-chroma/driver.toml`. Every field is
//! optional; a missing file means defaults.

use std::path::{Path, PathBuf};

use razer_transport::WaitWindow;
use serde::{Deserialize, Serialize};

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// tracing filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Print all requests/responses
    pub monitor: bool,
    /// Include hex dumps in monitor output
    pub show_hex: bool,
    /// Override the device's minimum request/response wait (µs)
    pub wait_min_us: Option<u64>,
    /// Override the device's maximum request/response wait (µs)
    pub wait_max_us: Option<u64>,
    /// Product ID to prefer when several devices are attached
    pub product_id: Option<u16>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            monitor: false,
            show_hex: false,
            wait_min_us: None,
            wait_max_us: None,
            product_id: None,
        }
    }
}

impl DriverConfig {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("razer-chroma")
            .join("driver.toml")
    }

    /// Load config from a file, or return default if not found
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: DriverConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Wait window after applying overrides to the device default
    pub fn wait_window(&self, device_default: WaitWindow) -> WaitWindow {
        if self.wait_min_us.is_none() && self.wait_max_us.is_none() {
            return device_default;
        }
        let min = self
            .wait_min_us
            .unwrap_or(device_default.min.as_micros() as u64);
        let max = self
            .wait_max_us
            .unwrap_or(device_default.max.as_micros() as u64);
        WaitWindow::from_micros(min, max)
    }
}
