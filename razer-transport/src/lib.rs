//! Transport layer for Razer Chroma HID devices
//!
//! This crate owns everything between a 90-byte report and the wire:
//!
//! - the report codec (layout, checksum, status decoding)
//! - the transaction engine (send, wait, read, validate)
//! - transport backends: hidapi feature reports, a printing middleware
//!   and an in-memory mock for tests

pub mod device_registry;
pub mod error;
pub mod mock;
pub mod printer;
pub mod protocol;
pub mod report;
pub mod transaction;
pub mod types;

mod discovery;
mod hid_usb;

pub use device_registry::{is_supported, SUPPORTED_PIDS, VENDOR_ID};
pub use error::TransportError;
pub use mock::{MockReply, MockTransport};
pub use printer::{OutputFormat, PacketFilter, PrinterConfig, PrinterTransport};
pub use report::{compute_crc, crc_of, CommandStatus, Report, ReportError};
pub use transaction::{classify, send, send_lenient, TransactionError};
pub use types::{DiscoveredDevice, TransportDeviceInfo, TransportType, WaitWindow};

pub use discovery::HidDiscovery;
pub use hid_usb::HidUsbTransport;

use std::sync::Arc;

/// The core transport trait - all backends implement this
///
/// One call is one complete request/response cycle. Implementations must not
/// interleave two exchanges on the same device.
pub trait Transport: Send + Sync {
    /// Write one encoded report, wait inside `wait`, then read the response
    ///
    /// # Arguments
    /// * `request` - Encoded report (90 bytes, no report ID)
    /// * `wait` - Delay window between write and read
    ///
    /// # Returns
    /// Raw response bytes with any report ID stripped
    fn exchange(&self, request: &[u8], wait: WaitWindow) -> Result<Vec<u8>, TransportError>;

    /// Get device information
    fn device_info(&self) -> &TransportDeviceInfo;

    /// Check if transport is still connected
    fn is_connected(&self) -> bool {
        true
    }
}

/// Type alias for a boxed transport
pub type BoxedTransport = Arc<dyn Transport>;
