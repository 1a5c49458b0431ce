//! Transport error types

use thiserror::Error;

/// Errors that can occur during transport operations
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Device disconnected")]
    Disconnected,

    #[error("Invalid report length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    // HID-specific errors
    #[error("HID error: {0}")]
    HidError(String),

    #[error("HID permission denied: {0}")]
    HidPermissionDenied(String),

    // Generic
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<hidapi::HidError> for TransportError {
    fn from(e: hidapi::HidError) -> Self {
        let msg = e.to_string();
        if msg.contains("Permission denied") || msg.contains("EPERM") {
            TransportError::HidPermissionDenied(msg)
        } else {
            TransportError::HidError(msg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_classification() {
        let err: TransportError = hidapi::HidError::HidApiError {
            message: "open failed: Permission denied".into(),
        }
        .into();
        assert!(matches!(err, TransportError::HidPermissionDenied(_)));

        let err: TransportError = hidapi::HidError::HidApiError {
            message: "device gone".into(),
        }
        .into();
        assert!(matches!(err, TransportError::HidError(_)));
    }

    #[test]
    fn test_invalid_length_message() {
        let err = TransportError::InvalidLength {
            expected: 91,
            actual: 64,
        };
        assert_eq!(
            err.to_string(),
            "Invalid report length: expected 91 bytes, got 64"
        );
    }
}
