//! Device registry - supported USB IDs
//!
//! Only devices listed here are picked up by discovery. The richer per-model
//! data (name, matrix geometry, supported effects) lives in the device crate.

use crate::protocol::device;

/// Razer vendor ID
pub const VENDOR_ID: u16 = device::VENDOR_ID;

/// Product IDs handled by this driver
pub const SUPPORTED_PIDS: &[u16] = &[
    device::PID_CHROMA_HDK, // Chroma HDK
];

/// Check if a VID/PID pair is handled by this driver
#[inline]
pub fn is_supported(vid: u16, pid: u16) -> bool {
    vid == VENDOR_ID && SUPPORTED_PIDS.contains(&pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chroma_hdk_supported() {
        assert!(is_supported(0x1532, 0x0F09));
    }

    #[test]
    fn test_other_ids_not_supported() {
        assert!(!is_supported(0x1532, 0x0000));
        assert!(!is_supported(0x3151, 0x0F09)); // wrong vendor
    }
}
