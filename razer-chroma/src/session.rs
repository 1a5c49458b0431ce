//! Per-device session
//!
//! A [`ChromaDevice`] binds a transport to the profile of the device behind
//! it and owns the state the firmware cannot report back (the last brightness
//! written).

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use razer_transport::{transaction, Report, Transport, WaitWindow};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::effects::{self, Effect};
use crate::error::DeviceError;
use crate::frame::{self, FrameStop};
use crate::led::{LedId, Storage};
use crate::profile::{self, DeviceProfile};

/// Brightness assumed when a session opens (the device powers up at 100%)
pub const INITIAL_BRIGHTNESS: u8 = 0xFF;

/// Longest serial the firmware returns
pub const SERIAL_LEN: usize = 22;

/// Storage used for persistent lighting settings
const MATRIX_STORAGE: Storage = Storage::VarStore;
/// LED zone used for whole-device lighting settings
const MATRIX_LED: LedId = LedId::Zero;

/// Firmware version as reported by GET_FIRMWARE_VERSION
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
}

impl FirmwareVersion {
    /// Parse from response arguments
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match bytes {
            [major, minor, ..] => Self {
                major: *major,
                minor: *minor,
            },
            _ => Self::default(),
        }
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

/// Device mode pair as reported by GET_DEVICE_MODE
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeviceMode {
    pub mode: u8,
    pub param: u8,
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.mode, self.param)
    }
}

/// Serial number bytes to text: at most 22 bytes, cut at the first NUL
pub fn serial_from_bytes(bytes: &[u8]) -> String {
    let bytes = &bytes[..bytes.len().min(SERIAL_LEN)];
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Outcome of writing a custom frame buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameSummary {
    /// Row reports accepted by the device
    pub rows_sent: usize,
    /// Row reports whose transaction failed
    pub rows_failed: usize,
    /// Set when parsing stopped before the end of the buffer
    pub stop: Option<FrameStop>,
    /// Buffer bytes taken up by the rows that were parsed
    pub consumed: usize,
}

/// An open Chroma device
pub struct ChromaDevice {
    transport: Arc<dyn Transport>,
    profile: &'static DeviceProfile,
    wait: WaitWindow,
    brightness: AtomicU8,
}

impl ChromaDevice {
    /// Bind `transport` to the profile matching its product ID
    pub fn open(transport: Arc<dyn Transport>) -> Result<Self, DeviceError> {
        let pid = transport.device_info().pid;
        let profile = profile::lookup(pid).ok_or(DeviceError::UnsupportedDevice(pid))?;
        info!("Opened {} ({:04X})", profile.name, pid);

        Ok(Self {
            transport,
            profile,
            wait: profile.wait(),
            brightness: AtomicU8::new(INITIAL_BRIGHTNESS),
        })
    }

    /// Override the profile's wait window
    pub fn with_wait(mut self, wait: WaitWindow) -> Self {
        self.wait = wait;
        self
    }

    pub fn profile(&self) -> &'static DeviceProfile {
        self.profile
    }

    pub fn product_id(&self) -> u16 {
        self.profile.product_id
    }

    pub fn wait(&self) -> WaitWindow {
        self.wait
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Run one transaction against the device
    pub fn send(&self, mut request: Report) -> Result<Report, DeviceError> {
        Ok(transaction::send(
            self.transport.as_ref(),
            &mut request,
            self.wait,
        )?)
    }

    // === Device Info ===

    pub fn firmware_version(&self) -> Result<FirmwareVersion, DeviceError> {
        let resp = self.send(effects::get_firmware_version())?;
        Ok(FirmwareVersion::from_bytes(&resp.arguments))
    }

    pub fn serial(&self) -> Result<String, DeviceError> {
        let resp = self.send(effects::get_serial())?;
        Ok(serial_from_bytes(&resp.arguments))
    }

    pub fn device_mode(&self) -> Result<DeviceMode, DeviceError> {
        let resp = self.send(effects::get_device_mode())?;
        Ok(DeviceMode {
            mode: resp.arguments[0],
            param: resp.arguments[1],
        })
    }

    /// Mode values other than normal/driver are sent as normal
    pub fn set_device_mode(&self, mode: u8, param: u8) -> Result<(), DeviceError> {
        self.send(effects::set_device_mode(mode, param))?;
        Ok(())
    }

    /// Friendly device name
    pub fn device_type(&self) -> &'static str {
        self.profile.name
    }

    // === Brightness ===

    /// Last brightness written in this session (no device traffic)
    pub fn brightness(&self) -> u8 {
        self.brightness.load(Ordering::Relaxed)
    }

    /// Write the matrix brightness; the cache follows only on success
    pub fn set_brightness(&self, value: u8) -> Result<(), DeviceError> {
        self.send(effects::set_brightness(MATRIX_STORAGE, MATRIX_LED, value))?;
        self.brightness.store(value, Ordering::Relaxed);
        debug!("Brightness set to {}", value);
        Ok(())
    }

    /// Read the brightness from the device and refresh the cache
    pub fn query_brightness(&self) -> Result<u8, DeviceError> {
        let resp = self.send(effects::get_brightness(MATRIX_STORAGE, MATRIX_LED))?;
        let value = resp.arguments[2];
        self.brightness.store(value, Ordering::Relaxed);
        Ok(value)
    }

    // === Effects ===

    pub fn set_effect(&self, effect: Effect) -> Result<(), DeviceError> {
        if !self.profile.effects.supports(&effect) {
            return Err(DeviceError::UnsupportedEffect(format!(
                "{} on {}",
                effect.name(),
                self.profile.name
            )));
        }
        self.send(effect.to_report(MATRIX_STORAGE, MATRIX_LED))?;
        Ok(())
    }

    /// Breathing effect chosen by colour byte count (3 single, 6 dual, else random)
    pub fn set_breathing_from_bytes(&self, bytes: &[u8]) -> Result<(), DeviceError> {
        if !self.profile.effects.breathing {
            return Err(DeviceError::UnsupportedEffect(format!(
                "breath on {}",
                self.profile.name
            )));
        }
        self.send(effects::breathing_from_bytes(
            MATRIX_STORAGE,
            MATRIX_LED,
            bytes,
        ))?;
        Ok(())
    }

    /// Stream a custom frame buffer to the device, one row report at a time.
    ///
    /// Each row is sent before the next is parsed. A failed row is logged
    /// and the remaining rows are still sent.
    pub fn write_frame(&self, buf: &[u8]) -> FrameSummary {
        let mut summary = FrameSummary::default();
        let mut rows = frame::assemble(buf);

        for report in rows.by_ref() {
            match self.send(report) {
                Ok(_) => summary.rows_sent += 1,
                Err(e) => {
                    warn!("Frame row {} failed: {}", report.arguments[2], e);
                    summary.rows_failed += 1;
                }
            }
        }

        summary.stop = rows.stop_reason();
        summary.consumed = rows.offset();
        if let Some(stop) = summary.stop {
            warn!("Custom frame parsing stopped at byte {}: {}", summary.consumed, stop);
        }
        summary
    }
}
