//! Common types for transport layer

use std::time::Duration;

use serde::Serialize;

use crate::protocol::timing;

/// Transport type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TransportType {
    /// Direct USB HID connection (feature reports on the control interface)
    HidUsb,
    /// In-memory scripted transport
    Mock,
}

/// Device identification information
#[derive(Debug, Clone, Serialize)]
pub struct TransportDeviceInfo {
    /// USB Vendor ID
    pub vid: u16,
    /// USB Product ID
    pub pid: u16,
    /// USB interface number
    pub interface: i32,
    /// Transport type
    pub transport_type: TransportType,
    /// Device path or identifier (transport-specific)
    pub device_path: String,
    /// Serial number if available
    pub serial: Option<String>,
    /// Product name if available
    pub product_name: Option<String>,
}

/// Inclusive range the host sleeps between sending a request and reading
/// its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitWindow {
    pub min: Duration,
    pub max: Duration,
}

impl WaitWindow {
    pub fn from_micros(min_us: u64, max_us: u64) -> Self {
        let min = Duration::from_micros(min_us);
        let max = Duration::from_micros(max_us.max(min_us));
        Self { min, max }
    }

    /// Window for the Chroma HDK (900-1000 µs)
    pub fn chroma_hdk() -> Self {
        Self::from_micros(timing::CHROMA_HDK_WAIT_MIN_US, timing::CHROMA_HDK_WAIT_MAX_US)
    }
}

impl Default for WaitWindow {
    fn default() -> Self {
        Self::chroma_hdk()
    }
}

/// Discovered device that can be opened
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveredDevice {
    /// Device information
    pub info: TransportDeviceInfo,
}
