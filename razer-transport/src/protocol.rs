//! Protocol constants for the Razer Chroma report format

/// Size of one report on the wire (request and response alike)
pub const REPORT_SIZE: usize = 90;
/// Capacity of the argument payload inside a report
pub const ARGUMENTS_SIZE: usize = 80;
/// HID feature report buffer: report ID byte + report
pub const FEATURE_REPORT_SIZE: usize = REPORT_SIZE + 1;

/// Byte offsets inside the 90-byte report
pub mod offset {
    pub const STATUS: usize = 0;
    pub const TRANSACTION_ID: usize = 1;
    pub const REMAINING_PACKETS: usize = 2;
    pub const PROTOCOL_TYPE: usize = 4;
    pub const DATA_SIZE: usize = 5;
    pub const COMMAND_CLASS: usize = 6;
    pub const COMMAND_ID: usize = 7;
    pub const ARGUMENTS: usize = 8;
    pub const CRC: usize = 88;
    pub const RESERVED: usize = 89;
}

/// Status byte values (response only)
pub mod status {
    pub const NEW: u8 = 0x00;
    pub const BUSY: u8 = 0x01;
    pub const SUCCESS: u8 = 0x02;
    pub const FAILURE: u8 = 0x03;
    pub const TIMEOUT: u8 = 0x04;
    pub const NOT_SUPPORTED: u8 = 0x05;
}

/// The only protocol type this wire format uses
pub const PROTOCOL_TYPE: u8 = 0x00;

/// Command classes
pub mod class {
    /// Standard device commands (firmware, serial, device mode)
    pub const STANDARD: u8 = 0x00;
    /// Extended matrix lighting commands
    pub const EXTENDED_MATRIX: u8 = 0x0F;
}

/// Transaction IDs used by this device class
pub mod transaction {
    /// Default group ID for standard commands
    pub const DEFAULT: u8 = 0xFF;
    /// Extended matrix lighting commands
    pub const EXTENDED_MATRIX: u8 = 0x3F;
    /// Row frame submissions
    pub const CUSTOM_FRAME: u8 = 0x1F;
}

/// Command IDs, grouped by class
pub mod cmd {
    use super::class;

    /// Bit 7 of the command ID marks a query (device → host data)
    pub const QUERY_FLAG: u8 = 0x80;

    // Standard class (0x00)
    pub const SET_DEVICE_MODE: u8 = 0x04;
    pub const GET_FIRMWARE_VERSION: u8 = 0x81;
    pub const GET_SERIAL: u8 = 0x82;
    pub const GET_DEVICE_MODE: u8 = 0x84;

    // Extended matrix class (0x0F)
    pub const SET_EFFECT: u8 = 0x02;
    pub const SET_CUSTOM_FRAME: u8 = 0x03;
    pub const SET_BRIGHTNESS: u8 = 0x04;
    pub const GET_BRIGHTNESS: u8 = 0x84;

    /// Check if a command ID is a query
    #[inline]
    pub fn is_query(id: u8) -> bool {
        id & QUERY_FLAG != 0
    }

    /// Get human-readable name for a class/command pair
    pub fn name(command_class: u8, id: u8) -> &'static str {
        match (command_class, id) {
            (class::STANDARD, SET_DEVICE_MODE) => "SET_DEVICE_MODE",
            (class::STANDARD, GET_FIRMWARE_VERSION) => "GET_FIRMWARE_VERSION",
            (class::STANDARD, GET_SERIAL) => "GET_SERIAL",
            (class::STANDARD, GET_DEVICE_MODE) => "GET_DEVICE_MODE",
            (class::EXTENDED_MATRIX, SET_EFFECT) => "SET_EFFECT",
            (class::EXTENDED_MATRIX, SET_CUSTOM_FRAME) => "SET_CUSTOM_FRAME",
            (class::EXTENDED_MATRIX, SET_BRIGHTNESS) => "SET_BRIGHTNESS",
            (class::EXTENDED_MATRIX, GET_BRIGHTNESS) => "GET_BRIGHTNESS",
            _ => "UNKNOWN",
        }
    }
}

/// Request/response wait windows per device class
pub mod timing {
    /// Chroma HDK: minimum wait between SET_REPORT and GET_REPORT (µs)
    pub const CHROMA_HDK_WAIT_MIN_US: u64 = 900;
    /// Chroma HDK: maximum wait between SET_REPORT and GET_REPORT (µs)
    pub const CHROMA_HDK_WAIT_MAX_US: u64 = 1000;
}

/// Device identification constants
pub mod device {
    /// Razer USB vendor ID
    pub const VENDOR_ID: u16 = 0x1532;

    /// Razer Chroma HDK
    pub const PID_CHROMA_HDK: u16 = 0x0F09;

    /// Interface that carries the control channel
    pub const CONTROL_INTERFACE: i32 = 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_cover_report() {
        assert_eq!(offset::ARGUMENTS + ARGUMENTS_SIZE, offset::CRC);
        assert_eq!(offset::RESERVED + 1, REPORT_SIZE);
    }

    #[test]
    fn test_query_flag() {
        assert!(cmd::is_query(cmd::GET_SERIAL));
        assert!(cmd::is_query(cmd::GET_BRIGHTNESS));
        assert!(!cmd::is_query(cmd::SET_EFFECT));
        assert!(!cmd::is_query(cmd::SET_DEVICE_MODE));
    }

    #[test]
    fn test_command_names_use_class() {
        // Same ID, different class
        assert_eq!(
            cmd::name(class::STANDARD, cmd::GET_DEVICE_MODE),
            "GET_DEVICE_MODE"
        );
        assert_eq!(
            cmd::name(class::EXTENDED_MATRIX, cmd::GET_BRIGHTNESS),
            "GET_BRIGHTNESS"
        );
        assert_eq!(cmd::name(0x42, 0x01), "UNKNOWN");
    }
}
