//! HID USB transport using feature reports on the control interface

use std::time::Duration;

use hidapi::HidDevice;
use parking_lot::Mutex;
use tracing::debug;

use crate::error::TransportError;
use crate::protocol::{FEATURE_REPORT_SIZE, REPORT_SIZE};
use crate::types::{TransportDeviceInfo, WaitWindow};
use crate::Transport;

/// HID transport for a Razer device connected over USB
///
/// Every exchange is SET_REPORT (report ID 0 + 90 bytes), a sleep inside the
/// wait window, then GET_REPORT. The device lock is held for the whole cycle
/// so a second caller cannot read the first caller's response.
pub struct HidUsbTransport {
    device: Mutex<HidDevice>,
    info: TransportDeviceInfo,
}

impl HidUsbTransport {
    pub fn new(device: HidDevice, info: TransportDeviceInfo) -> Self {
        Self {
            device: Mutex::new(device),
            info,
        }
    }

    fn sleep_for(wait: WaitWindow) -> Duration {
        // Shortest sleep the device tolerates
        wait.min
    }
}

impl Transport for HidUsbTransport {
    fn exchange(&self, request: &[u8], wait: WaitWindow) -> Result<Vec<u8>, TransportError> {
        if request.len() != REPORT_SIZE {
            return Err(TransportError::InvalidLength {
                expected: REPORT_SIZE,
                actual: request.len(),
            });
        }

        let mut buf = [0u8; FEATURE_REPORT_SIZE];
        buf[1..].copy_from_slice(request);

        let device = self.device.lock();
        debug!("SET_REPORT: {:02X?}", &buf[..12]);
        device.send_feature_report(&buf)?;

        std::thread::sleep(Self::sleep_for(wait));

        let mut resp = [0u8; FEATURE_REPORT_SIZE];
        let len = device.get_feature_report(&mut resp)?;
        drop(device);

        if len != FEATURE_REPORT_SIZE {
            return Err(TransportError::InvalidLength {
                expected: FEATURE_REPORT_SIZE,
                actual: len,
            });
        }

        debug!("GET_REPORT: {:02X?}", &resp[..12]);
        Ok(resp[1..].to_vec())
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }

    fn is_connected(&self) -> bool {
        self.device.lock().get_product_string().is_ok()
    }
}

impl Drop for HidUsbTransport {
    fn drop(&mut self) {
        debug!(
            "HidUsbTransport for {:04X}:{:04X} dropped",
            self.info.vid, self.info.pid
        );
    }
}
