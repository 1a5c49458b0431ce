//! In-memory transport with scripted replies
//!
//! Used by the protocol tests in this workspace. Each call to `exchange`
//! records the request and pops the next reply from the queue. When the queue
//! is empty the default reply is used (echo with `Success`).

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::error::TransportError;
use crate::protocol::{device, offset, status, REPORT_SIZE};
use crate::types::{TransportDeviceInfo, TransportType, WaitWindow};
use crate::Transport;

/// One scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Echo the request back with the given status byte
    Echo { status: u8 },
    /// Echo the request with the status byte and arguments overwritten
    EchoWith { status: u8, arguments: Vec<u8> },
    /// Return these bytes verbatim
    Raw(Vec<u8>),
    /// Fail the exchange with `TransportError::Disconnected`
    Disconnected,
    /// Fail the exchange with `TransportError::HidError`
    HidError(String),
}

impl MockReply {
    pub fn success() -> Self {
        Self::Echo {
            status: status::SUCCESS,
        }
    }

    pub fn status(status: u8) -> Self {
        Self::Echo { status }
    }

    /// Successful echo carrying response arguments (query replies)
    pub fn with_arguments(arguments: &[u8]) -> Self {
        Self::EchoWith {
            status: status::SUCCESS,
            arguments: arguments.to_vec(),
        }
    }

    fn produce(self, request: &[u8]) -> Result<Vec<u8>, TransportError> {
        match self {
            Self::Echo { status } => {
                let mut resp = request.to_vec();
                if let Some(b) = resp.get_mut(offset::STATUS) {
                    *b = status;
                }
                Ok(resp)
            }
            Self::EchoWith { status, arguments } => {
                let mut resp = request.to_vec();
                if resp.len() == REPORT_SIZE {
                    resp[offset::STATUS] = status;
                    let end = (offset::ARGUMENTS + arguments.len()).min(offset::CRC);
                    resp[offset::ARGUMENTS..end]
                        .copy_from_slice(&arguments[..end - offset::ARGUMENTS]);
                }
                Ok(resp)
            }
            Self::Raw(bytes) => Ok(bytes),
            Self::Disconnected => Err(TransportError::Disconnected),
            Self::HidError(msg) => Err(TransportError::HidError(msg)),
        }
    }
}

/// Scripted transport that records every request it sees
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<Vec<u8>>>,
    info: TransportDeviceInfo,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Mock presenting itself as a Chroma HDK
    pub fn new() -> Self {
        Self::with_pid(device::PID_CHROMA_HDK)
    }

    pub fn with_pid(pid: u16) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            info: TransportDeviceInfo {
                vid: device::VENDOR_ID,
                pid,
                interface: device::CONTROL_INTERFACE,
                transport_type: TransportType::Mock,
                device_path: "mock".into(),
                serial: None,
                product_name: Some("Mock Razer Device".into()),
            },
        }
    }

    /// Queue a reply for the next exchange
    pub fn push_reply(&self, reply: MockReply) {
        self.replies.lock().push_back(reply);
    }

    /// Builder form of `push_reply`
    pub fn with_reply(self, reply: MockReply) -> Self {
        self.push_reply(reply);
        self
    }

    /// All requests seen so far, in order
    pub fn requests(&self) -> Vec<Vec<u8>> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_request(&self) -> Option<Vec<u8>> {
        self.requests.lock().last().cloned()
    }
}

impl Transport for MockTransport {
    fn exchange(&self, request: &[u8], _wait: WaitWindow) -> Result<Vec<u8>, TransportError> {
        self.requests.lock().push(request.to_vec());
        let reply = self
            .replies
            .lock()
            .pop_front()
            .unwrap_or_else(MockReply::success);
        reply.produce(request)
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }
}
