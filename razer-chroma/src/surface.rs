//! Attribute-style control surface
//!
//! Byte-in / string-out adapter over a [`ChromaDevice`], one method per
//! device attribute. Errors never cross this boundary: they are logged and
//! reads fall back to a fixed value. Outputs carry no trailing newline.

use tracing::warn;

use crate::effects::Effect;
use crate::led::Rgb;
use crate::session::{ChromaDevice, DeviceMode, FirmwareVersion};

/// Version string reported by `read_version`
pub const DRIVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse a text brightness write: ASCII decimal, surrounding whitespace
/// ignored, values above 255 clamp to 255.
pub fn parse_brightness(input: &[u8]) -> Option<u8> {
    let text = std::str::from_utf8(input).ok()?.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = text
        .bytes()
        .fold(0u32, |acc, d| (acc * 10 + (d - b'0') as u32).min(u8::MAX as u32 + 1));
    Some(value.min(u8::MAX as u32) as u8)
}

pub struct PeripheralControlSurface {
    device: ChromaDevice,
}

impl PeripheralControlSurface {
    pub fn new(device: ChromaDevice) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &ChromaDevice {
        &self.device
    }

    /// Served from the session cache
    pub fn read_matrix_brightness(&self) -> String {
        self.device.brightness().to_string()
    }

    pub fn write_matrix_brightness(&self, input: &[u8]) {
        let Some(value) = parse_brightness(input) else {
            warn!("Brightness only accepts a decimal number");
            return;
        };
        if let Err(e) = self.device.set_brightness(value) {
            warn!("Setting brightness failed: {}", e);
        }
    }

    /// Binary form of the brightness write: exactly one byte, used as-is
    pub fn write_matrix_brightness_raw(&self, input: &[u8]) {
        let [value] = input else {
            warn!("Raw brightness only takes 1 byte");
            return;
        };
        if let Err(e) = self.device.set_brightness(*value) {
            warn!("Setting brightness failed: {}", e);
        }
    }

    pub fn read_firmware_version(&self) -> String {
        self.device
            .firmware_version()
            .unwrap_or_else(|e| {
                warn!("Reading firmware version failed: {}", e);
                FirmwareVersion::default()
            })
            .to_string()
    }

    pub fn read_device_type(&self) -> String {
        self.device.device_type().to_string()
    }

    pub fn read_device_serial(&self) -> String {
        self.device.serial().unwrap_or_else(|e| {
            warn!("Reading serial failed: {}", e);
            String::new()
        })
    }

    pub fn read_device_mode(&self) -> String {
        self.device
            .device_mode()
            .unwrap_or_else(|e| {
                warn!("Reading device mode failed: {}", e);
                DeviceMode::default()
            })
            .to_string()
    }

    pub fn write_device_mode(&self, input: &[u8]) {
        let [mode, param] = input else {
            warn!("Device mode only takes 2 bytes");
            return;
        };
        if let Err(e) = self.device.set_device_mode(*mode, *param) {
            warn!("Setting device mode failed: {}", e);
        }
    }

    fn apply(&self, effect: Effect) {
        if let Err(e) = self.device.set_effect(effect) {
            warn!("Setting {} effect failed: {}", effect.name(), e);
        }
    }

    pub fn write_matrix_effect_none(&self, _input: &[u8]) {
        self.apply(Effect::None);
    }

    pub fn write_matrix_effect_spectrum(&self, _input: &[u8]) {
        self.apply(Effect::Spectrum);
    }

    pub fn write_matrix_effect_static(&self, input: &[u8]) {
        let [r, g, b] = input else {
            warn!("Static mode only accepts RGB (3 bytes)");
            return;
        };
        self.apply(Effect::Static(Rgb::new(*r, *g, *b)));
    }

    /// 3 bytes single colour, 6 bytes dual colour, anything else random
    pub fn write_matrix_effect_breath(&self, input: &[u8]) {
        if let Err(e) = self.device.set_breathing_from_bytes(input) {
            warn!("Setting breath effect failed: {}", e);
        }
    }

    pub fn write_matrix_effect_custom(&self, _input: &[u8]) {
        self.apply(Effect::CustomFrame);
    }

    pub fn write_matrix_custom_frame(&self, input: &[u8]) {
        self.device.write_frame(input);
    }

    pub fn read_version(&self) -> String {
        DRIVER_VERSION.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_brightness() {
        assert_eq!(parse_brightness(b"200"), Some(200));
        assert_eq!(parse_brightness(b"  42\n"), Some(42));
        assert_eq!(parse_brightness(b"0"), Some(0));
        assert_eq!(parse_brightness(b"300"), Some(255));
        assert_eq!(parse_brightness(b"99999999999999"), Some(255));
        assert_eq!(parse_brightness(b"7"), Some(7));
        assert_eq!(parse_brightness(b"abc"), None);
        assert_eq!(parse_brightness(b""), None);
        assert_eq!(parse_brightness(&[1, 2]), None);
    }

    #[test]
    fn test_parse_brightness_is_text_only() {
        // 0x37 is the digit '7', never the value 55
        assert_eq!(parse_brightness(&[0x37]), Some(7));
        assert_eq!(parse_brightness(&[0xC8]), None);
        assert_eq!(parse_brightness(&[0x0A]), None);
        assert_eq!(parse_brightness(b"\n"), None);
        assert_eq!(parse_brightness(b" \t "), None);
    }
}
