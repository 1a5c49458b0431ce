//! Device layer error types

use razer_transport::{TransactionError, TransportError};
use thiserror::Error;

/// Errors from device operations
#[derive(Error, Debug)]
pub enum DeviceError {
    /// Transport layer error (open, enumerate)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A request/response cycle did not complete cleanly
    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    /// No profile for this product ID
    #[error("Unsupported device: PID 0x{0:04X}")]
    UnsupportedDevice(u16),

    /// Effect not available on this device
    #[error("Effect not supported: {0}")]
    UnsupportedEffect(String),
}
