//! Fixed-size report codec
//!
//! Every exchange with the device, in both directions, is one 90-byte report:
//!
//! ```text
//! [0]      status             response only (0x00 on requests)
//! [1]      transaction_id     correlation tag
//! [2..4]   remaining_packets  u16, big endian, echoed by the device
//! [4]      protocol_type      always 0x00
//! [5]      data_size          meaningful bytes in `arguments`
//! [6]      command_class
//! [7]      command_id         bit 7 set = query
//! [8..88]  arguments
//! [88]     crc                XOR of bytes 1..88
//! [89]     reserved           always 0x00
//! ```

use std::fmt;

use thiserror::Error;
use zerocopy::byteorder::big_endian::U16;
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout};

use crate::protocol::{self, cmd, offset, status, transaction, ARGUMENTS_SIZE, REPORT_SIZE};

/// Report decoding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Invalid report length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Device status carried in byte 0 of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandStatus {
    New = status::NEW,
    Busy = status::BUSY,
    Success = status::SUCCESS,
    Failure = status::FAILURE,
    Timeout = status::TIMEOUT,
    NotSupported = status::NOT_SUPPORTED,
}

impl CommandStatus {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            status::NEW => Some(Self::New),
            status::BUSY => Some(Self::Busy),
            status::SUCCESS => Some(Self::Success),
            status::FAILURE => Some(Self::Failure),
            status::TIMEOUT => Some(Self::Timeout),
            status::NOT_SUPPORTED => Some(Self::NotSupported),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Busy => "BUSY",
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Timeout => "TIMEOUT",
            Self::NotSupported => "NOT_SUPPORTED",
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One 90-byte report, laid out exactly as it travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct Report {
    pub status: u8,
    pub transaction_id: u8,
    remaining_packets: U16,
    pub protocol_type: u8,
    pub data_size: u8,
    pub command_class: u8,
    pub command_id: u8,
    pub arguments: [u8; ARGUMENTS_SIZE],
    pub crc: u8,
    pub reserved: u8,
}

const _: () = assert!(std::mem::size_of::<Report>() == REPORT_SIZE);

impl Default for Report {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl Report {
    /// All-zero report (also the best-effort response when an exchange fails)
    pub fn zeroed() -> Self {
        Self::new_zeroed()
    }

    /// Build a request header with the default transaction ID.
    ///
    /// Arguments are left zero-filled for the caller to populate.
    pub fn new_request(command_class: u8, command_id: u8, data_size: u8) -> Self {
        let mut report = Self::zeroed();
        report.status = status::NEW;
        report.transaction_id = transaction::DEFAULT;
        report.protocol_type = protocol::PROTOCOL_TYPE;
        report.data_size = data_size;
        report.command_class = command_class;
        report.command_id = command_id;
        report
    }

    /// Override the transaction ID
    pub fn with_transaction_id(mut self, id: u8) -> Self {
        self.transaction_id = id;
        self
    }

    pub fn remaining_packets(&self) -> u16 {
        self.remaining_packets.get()
    }

    pub fn set_remaining_packets(&mut self, count: u16) {
        self.remaining_packets = U16::new(count);
    }

    /// Decoded status byte; `None` for values outside the known set
    pub fn status(&self) -> Option<CommandStatus> {
        CommandStatus::from_u8(self.status)
    }

    /// Meaningful part of `arguments` according to `data_size`
    pub fn payload(&self) -> &[u8] {
        let len = (self.data_size as usize).min(ARGUMENTS_SIZE);
        &self.arguments[..len]
    }

    /// Whether this report is a query (bit 7 of the command ID)
    pub fn is_query(&self) -> bool {
        cmd::is_query(self.command_id)
    }

    /// Serialize to the wire byte sequence
    pub fn to_bytes(&self) -> [u8; REPORT_SIZE] {
        let mut out = [0u8; REPORT_SIZE];
        out.copy_from_slice(self.as_bytes());
        out
    }

    /// Parse from the wire byte sequence; the length must be exactly 90
    pub fn from_bytes(data: &[u8]) -> Result<Self, ReportError> {
        Self::read_from_bytes(data).map_err(|_| ReportError::InvalidLength {
            expected: REPORT_SIZE,
            actual: data.len(),
        })
    }

    /// Checksum over the covered byte range of this report
    pub fn compute_crc(&self) -> u8 {
        compute_crc(self)
    }

    /// Store the checksum; called by the transaction engine before sending
    pub fn finalize(&mut self) {
        self.crc = self.compute_crc();
    }

    pub fn crc_valid(&self) -> bool {
        self.crc == self.compute_crc()
    }

    /// A response echoes the request's packet count, class and ID
    pub fn echoes(&self, request: &Report) -> bool {
        self.remaining_packets() == request.remaining_packets()
            && self.command_class == request.command_class
            && self.command_id == request.command_id
    }

    /// Header plus the meaningful payload as hex, for log lines
    pub fn hex_summary(&self) -> String {
        let header: Vec<String> = self.as_bytes()[..offset::ARGUMENTS]
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect();
        let payload: Vec<String> = self.payload().iter().map(|b| format!("{b:02X}")).collect();
        format!(
            "{} | {} | crc={:02X}",
            header.join(" "),
            payload.join(" "),
            self.crc
        )
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self.status() {
            Some(s) => s.name().to_string(),
            None => format!("0x{:02X}", self.status),
        };
        write!(
            f,
            "{} (class=0x{:02X} id=0x{:02X} tid=0x{:02X} size={} status={})",
            cmd::name(self.command_class, self.command_id),
            self.command_class,
            self.command_id,
            self.transaction_id,
            self.data_size,
            status
        )
    }
}

/// XOR of every byte except status (0), crc (88) and reserved (89)
pub fn compute_crc(report: &Report) -> u8 {
    crc_of(report.as_bytes())
}

/// Same checksum over a raw wire buffer
pub fn crc_of(bytes: &[u8]) -> u8 {
    bytes
        .iter()
        .take(offset::CRC)
        .skip(offset::TRANSACTION_ID)
        .fold(0u8, |crc, &b| crc ^ b)
}
