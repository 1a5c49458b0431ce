//! Transaction engine
//!
//! Sends one request report, reads one response and classifies it. The main
//! entry point is [`send`]; every error carries the best-effort response so
//! callers that only care about "whatever came back" can keep going.

use thiserror::Error;
use tracing::{debug, warn};

use crate::error::TransportError;
use crate::protocol::{cmd, REPORT_SIZE};
use crate::report::{CommandStatus, Report};
use crate::types::WaitWindow;
use crate::Transport;

/// Why a transaction did not complete cleanly
#[derive(Error, Debug)]
pub enum TransactionError {
    /// The exchange itself failed or returned the wrong number of bytes
    #[error("Transport failure: {source}")]
    TransportFailure {
        #[source]
        source: TransportError,
        /// Zeroed placeholder
        response: Report,
    },

    #[error(
        "Response doesn't match request: expected class 0x{expected_class:02X} id 0x{expected_id:02X}, got class 0x{:02X} id 0x{:02X}",
        .response.command_class,
        .response.command_id
    )]
    Mismatch {
        expected_class: u8,
        expected_id: u8,
        response: Report,
    },

    #[error("Command failed (class 0x{:02X} id 0x{:02X})", .response.command_class, .response.command_id)]
    CommandFailed { response: Report },

    #[error("Command not supported (class 0x{:02X} id 0x{:02X})", .response.command_class, .response.command_id)]
    Unsupported { response: Report },

    #[error("Command timed out (class 0x{:02X} id 0x{:02X})", .response.command_class, .response.command_id)]
    DeviceTimeout { response: Report },
}

impl TransactionError {
    /// Best-effort response carried by this error
    pub fn response(&self) -> &Report {
        match self {
            Self::TransportFailure { response, .. }
            | Self::Mismatch { response, .. }
            | Self::CommandFailed { response }
            | Self::Unsupported { response }
            | Self::DeviceTimeout { response } => response,
        }
    }

    pub fn into_response(self) -> Report {
        match self {
            Self::TransportFailure { response, .. }
            | Self::Mismatch { response, .. }
            | Self::CommandFailed { response }
            | Self::Unsupported { response }
            | Self::DeviceTimeout { response } => response,
        }
    }

    fn transport(source: TransportError) -> Self {
        Self::TransportFailure {
            source,
            response: Report::zeroed(),
        }
    }
}

/// Check a decoded response against the request that produced it.
///
/// `Busy`, `Success`, `New` and unknown status values are all accepted.
pub fn classify(request: &Report, response: Report) -> Result<Report, TransactionError> {
    if !response.echoes(request) {
        return Err(TransactionError::Mismatch {
            expected_class: request.command_class,
            expected_id: request.command_id,
            response,
        });
    }

    match response.status() {
        Some(CommandStatus::Failure) => Err(TransactionError::CommandFailed { response }),
        Some(CommandStatus::NotSupported) => Err(TransactionError::Unsupported { response }),
        Some(CommandStatus::Timeout) => Err(TransactionError::DeviceTimeout { response }),
        _ => Ok(response),
    }
}

/// Run one transaction: checksum, exchange, validate.
///
/// The request's `crc` field is recomputed before sending. No retries are
/// attempted.
pub fn send(
    transport: &dyn Transport,
    request: &mut Report,
    wait: WaitWindow,
) -> Result<Report, TransactionError> {
    request.finalize();
    debug!("Sending {}: {}", request, request.hex_summary());

    let raw = transport
        .exchange(&request.to_bytes(), wait)
        .map_err(TransactionError::transport)?;

    if raw.len() != REPORT_SIZE {
        return Err(TransactionError::transport(TransportError::InvalidLength {
            expected: REPORT_SIZE,
            actual: raw.len(),
        }));
    }

    let response = Report::from_bytes(&raw).map_err(|e| {
        TransactionError::transport(TransportError::Internal(e.to_string()))
    })?;
    debug!("Received {}: {}", response, response.hex_summary());

    classify(request, response)
}

/// Like [`send`], but logs any error and returns the best-effort response
pub fn send_lenient(transport: &dyn Transport, request: &mut Report, wait: WaitWindow) -> Report {
    match send(transport, request, wait) {
        Ok(response) => response,
        Err(e) => {
            warn!(
                "{} ({}, class 0x{:02X} id 0x{:02X}): response {:02X?}",
                e,
                cmd::name(request.command_class, request.command_id),
                request.command_class,
                request.command_id,
                e.response().to_bytes()
            );
            e.into_response()
        }
    }
}
