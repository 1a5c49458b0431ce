//! Effect command library
//!
//! Pure builders: each returns a fully populated request [`Report`] (crc is
//! filled in by the transaction engine). Nothing here touches a transport.

use razer_transport::protocol::{class, cmd, transaction};
use razer_transport::Report;

use crate::led::{LedId, Rgb, Storage};
use crate::profile;

/// Effect IDs carried in `arguments[2]` of SET_EFFECT
pub mod effect_id {
    pub const NONE: u8 = 0x00;
    pub const STATIC: u8 = 0x01;
    pub const BREATHING: u8 = 0x02;
    pub const SPECTRUM: u8 = 0x03;
    pub const CUSTOM_FRAME: u8 = 0x08;
}

/// Breathing sub-type carried in `arguments[3]`
pub mod breathing {
    pub const RANDOM: u8 = 0x00;
    pub const SINGLE: u8 = 0x01;
    pub const DUAL: u8 = 0x02;
}

/// Device modes accepted by SET_DEVICE_MODE
pub mod device_mode {
    pub const NORMAL: u8 = 0x00;
    pub const DRIVER: u8 = 0x03;
}

/// Most pixels a single row report can carry
pub const MAX_ROW_PIXELS: usize = 25;
/// Byte cap for the RGB payload of one row report
pub const MAX_ROW_RGB_BYTES: usize = MAX_ROW_PIXELS * 3;

/// Header for an extended matrix request
fn matrix_request(id: u8, data_size: u8) -> Report {
    Report::new_request(class::EXTENDED_MATRIX, id, data_size)
        .with_transaction_id(transaction::EXTENDED_MATRIX)
}

/// SET_EFFECT request with `[storage, led, effect]` already filled
fn effect_request(storage: Storage, led: LedId, effect: u8, data_size: u8) -> Report {
    let mut report = matrix_request(cmd::SET_EFFECT, data_size);
    report.arguments[0] = storage as u8;
    report.arguments[1] = led as u8;
    report.arguments[2] = effect;
    report
}

pub fn effect_none(storage: Storage, led: LedId) -> Report {
    effect_request(storage, led, effect_id::NONE, 0x06)
}

pub fn effect_static(storage: Storage, led: LedId, rgb: Rgb) -> Report {
    let mut report = effect_request(storage, led, effect_id::STATIC, 0x09);
    report.arguments[5] = 0x01;
    report.arguments[6..9].copy_from_slice(&rgb.to_bytes());
    report
}

pub fn effect_breathing_random(storage: Storage, led: LedId) -> Report {
    let mut report = effect_request(storage, led, effect_id::BREATHING, 0x06);
    report.arguments[3] = breathing::RANDOM;
    report
}

pub fn effect_breathing_single(storage: Storage, led: LedId, rgb: Rgb) -> Report {
    let mut report = effect_request(storage, led, effect_id::BREATHING, 0x09);
    report.arguments[3] = breathing::SINGLE;
    report.arguments[5] = 0x01;
    report.arguments[6..9].copy_from_slice(&rgb.to_bytes());
    report
}

pub fn effect_breathing_dual(storage: Storage, led: LedId, first: Rgb, second: Rgb) -> Report {
    let mut report = effect_request(storage, led, effect_id::BREATHING, 0x0C);
    report.arguments[3] = breathing::DUAL;
    report.arguments[5] = 0x02;
    report.arguments[6..9].copy_from_slice(&first.to_bytes());
    report.arguments[9..12].copy_from_slice(&second.to_bytes());
    report
}

pub fn effect_spectrum(storage: Storage, led: LedId) -> Report {
    effect_request(storage, led, effect_id::SPECTRUM, 0x06)
}

/// Switch the matrix to custom-frame mode.
///
/// Frames are volatile, so this always uses `NoStore` on the whole device.
pub fn effect_custom_frame() -> Report {
    effect_request(Storage::NoStore, LedId::Zero, effect_id::CUSTOM_FRAME, 0x0C)
}

/// Pick the breathing variant from the number of colour bytes supplied.
///
/// 3 bytes select single, 6 select dual. Any other length (including
/// empty) falls back to random.
pub fn breathing_from_bytes(storage: Storage, led: LedId, bytes: &[u8]) -> Report {
    match bytes.len() {
        3 => effect_breathing_single(storage, led, Rgb::new(bytes[0], bytes[1], bytes[2])),
        6 => effect_breathing_dual(
            storage,
            led,
            Rgb::new(bytes[0], bytes[1], bytes[2]),
            Rgb::new(bytes[3], bytes[4], bytes[5]),
        ),
        _ => effect_breathing_random(storage, led),
    }
}

/// One row of a custom frame.
///
/// `rgb` is clamped to [`MAX_ROW_RGB_BYTES`]. The caller is responsible for
/// supplying `(stop - start + 1) * 3` bytes; the row assembler checks this.
pub fn set_custom_frame_row(row: u8, start: u8, stop: u8, rgb: &[u8]) -> Report {
    let len = rgb.len().min(MAX_ROW_RGB_BYTES);
    // 5 header bytes + at most 75 rgb bytes always fits in a u8
    let mut report = matrix_request(cmd::SET_CUSTOM_FRAME, (5 + len) as u8)
        .with_transaction_id(transaction::CUSTOM_FRAME);
    report.arguments[2] = row;
    report.arguments[3] = start;
    report.arguments[4] = stop;
    report.arguments[5..5 + len].copy_from_slice(&rgb[..len]);
    report
}

pub fn set_brightness(storage: Storage, led: LedId, value: u8) -> Report {
    let mut report = matrix_request(cmd::SET_BRIGHTNESS, 0x03);
    report.arguments[0] = storage as u8;
    report.arguments[1] = led as u8;
    report.arguments[2] = value;
    report
}

pub fn get_brightness(storage: Storage, led: LedId) -> Report {
    let mut report = matrix_request(cmd::GET_BRIGHTNESS, 0x03);
    report.arguments[0] = storage as u8;
    report.arguments[1] = led as u8;
    report
}

pub fn get_firmware_version() -> Report {
    Report::new_request(class::STANDARD, cmd::GET_FIRMWARE_VERSION, 0x02)
}

pub fn get_serial() -> Report {
    Report::new_request(class::STANDARD, cmd::GET_SERIAL, 0x16)
}

pub fn get_device_mode() -> Report {
    Report::new_request(class::STANDARD, cmd::GET_DEVICE_MODE, 0x02)
}

/// Set the device mode.
///
/// Firmware only knows normal (0x00) and driver (0x03) mode; anything else
/// is sent as normal. The parameter byte is always zero.
pub fn set_device_mode(mode: u8, _param: u8) -> Report {
    let mode = match mode {
        device_mode::NORMAL | device_mode::DRIVER => mode,
        _ => device_mode::NORMAL,
    };
    let mut report = Report::new_request(class::STANDARD, cmd::SET_DEVICE_MODE, 0x02);
    report.arguments[0] = mode;
    report.arguments[1] = 0x00;
    report
}

/// Friendly device name for a product ID
pub fn device_type(product_id: u16) -> &'static str {
    profile::lookup(product_id)
        .map(|p| p.name)
        .unwrap_or(profile::UNKNOWN_DEVICE_NAME)
}

/// A lighting effect with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Static(Rgb),
    BreathingRandom,
    BreathingSingle(Rgb),
    BreathingDual(Rgb, Rgb),
    Spectrum,
    CustomFrame,
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Static(_) => "static",
            Self::BreathingRandom | Self::BreathingSingle(_) | Self::BreathingDual(..) => {
                "breath"
            }
            Self::Spectrum => "spectrum",
            Self::CustomFrame => "custom",
        }
    }

    /// Build the SET_EFFECT request. `CustomFrame` ignores `storage` and `led`.
    pub fn to_report(&self, storage: Storage, led: LedId) -> Report {
        match *self {
            Self::None => effect_none(storage, led),
            Self::Static(rgb) => effect_static(storage, led, rgb),
            Self::BreathingRandom => effect_breathing_random(storage, led),
            Self::BreathingSingle(rgb) => effect_breathing_single(storage, led, rgb),
            Self::BreathingDual(a, b) => effect_breathing_dual(storage, led, a, b),
            Self::Spectrum => effect_spectrum(storage, led),
            Self::CustomFrame => effect_custom_frame(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use razer_transport::protocol::device;

    const VS: Storage = Storage::VarStore;
    const ZERO: LedId = LedId::Zero;

    #[test]
    fn test_effect_none() {
        let r = effect_none(VS, ZERO);
        assert_eq!(r.command_class, 0x0F);
        assert_eq!(r.command_id, 0x02);
        assert_eq!(r.data_size, 6);
        assert_eq!(r.transaction_id, 0x3F);
        assert_eq!(&r.arguments[..3], &[0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_effect_static() {
        let r = effect_static(VS, ZERO, Rgb::new(0xFF, 0x00, 0x00));
        assert_eq!(r.data_size, 9);
        assert_eq!(
            &r.arguments[..9],
            &[0x01, 0x00, 0x01, 0x00, 0x00, 0x01, 0xFF, 0x00, 0x00]
        );
    }

    #[test]
    fn test_effect_breathing_variants() {
        let r = effect_breathing_random(VS, ZERO);
        assert_eq!(r.data_size, 6);
        assert_eq!(&r.arguments[..4], &[0x01, 0x00, 0x02, 0x00]);

        let r = effect_breathing_single(VS, ZERO, Rgb::new(1, 2, 3));
        assert_eq!(r.data_size, 9);
        assert_eq!(&r.arguments[..9], &[0x01, 0x00, 0x02, 0x01, 0, 0x01, 1, 2, 3]);

        let r = effect_breathing_dual(VS, ZERO, Rgb::new(1, 2, 3), Rgb::new(4, 5, 6));
        assert_eq!(r.data_size, 12);
        assert_eq!(
            &r.arguments[..12],
            &[0x01, 0x00, 0x02, 0x02, 0, 0x02, 1, 2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn test_effect_spectrum() {
        let r = effect_spectrum(VS, ZERO);
        assert_eq!(r.data_size, 6);
        assert_eq!(r.arguments[2], 0x03);
    }

    #[test]
    fn test_effect_custom_frame_is_volatile() {
        let r = effect_custom_frame();
        assert_eq!(r.data_size, 12);
        assert_eq!(&r.arguments[..3], &[0x00, 0x00, 0x08]);
    }

    #[test]
    fn test_breathing_from_bytes() {
        let single = breathing_from_bytes(VS, ZERO, &[9, 8, 7]);
        assert_eq!(single.arguments[3], breathing::SINGLE);
        assert_eq!(&single.arguments[6..9], &[9, 8, 7]);

        let dual = breathing_from_bytes(VS, ZERO, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(dual.arguments[3], breathing::DUAL);

        for len in [0usize, 1, 2, 4, 5, 7, 12] {
            let bytes = vec![0xAA; len];
            let r = breathing_from_bytes(VS, ZERO, &bytes);
            assert_eq!(r, effect_breathing_random(VS, ZERO), "len {len}");
        }
    }

    #[test]
    fn test_set_custom_frame_row() {
        let r = set_custom_frame_row(0, 0, 1, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(r.command_id, 0x03);
        assert_eq!(r.data_size, 11);
        assert_eq!(r.transaction_id, 0x1F);
        assert_eq!(&r.arguments[..11], &[0, 0, 0, 0, 1, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_set_custom_frame_row_clamps_payload() {
        let rgb = vec![0x11; 200];
        let r = set_custom_frame_row(3, 0, 0x0F, &rgb);
        assert_eq!(r.data_size as usize, 5 + MAX_ROW_RGB_BYTES);
        assert!(r.arguments[5..80].iter().all(|&b| b == 0x11));
    }

    #[test]
    fn test_brightness_builders() {
        let r = set_brightness(VS, ZERO, 200);
        assert_eq!((r.command_class, r.command_id, r.data_size), (0x0F, 0x04, 3));
        assert_eq!(&r.arguments[..3], &[0x01, 0x00, 200]);

        let r = get_brightness(VS, ZERO);
        assert_eq!((r.command_class, r.command_id, r.data_size), (0x0F, 0x84, 3));
    }

    #[test]
    fn test_standard_builders() {
        let r = get_firmware_version();
        assert_eq!((r.command_class, r.command_id, r.data_size), (0x00, 0x81, 2));
        assert_eq!(r.transaction_id, 0xFF);

        let r = get_serial();
        assert_eq!((r.command_id, r.data_size), (0x82, 0x16));

        let r = get_device_mode();
        assert_eq!((r.command_id, r.data_size), (0x84, 2));
    }

    #[test]
    fn test_set_device_mode_sanitises() {
        let r = set_device_mode(0x03, 0x07);
        assert_eq!(&r.arguments[..2], &[0x03, 0x00]);

        let r = set_device_mode(0x02, 0x00);
        assert_eq!(&r.arguments[..2], &[0x00, 0x00]);
    }

    #[test]
    fn test_builders_pass_crc_check() {
        let mut reports = vec![
            effect_none(VS, ZERO),
            effect_static(VS, ZERO, Rgb::RED),
            breathing_from_bytes(VS, ZERO, &[1, 2, 3, 4, 5, 6]),
            effect_custom_frame(),
            set_custom_frame_row(1, 2, 3, &[0; 6]),
            set_device_mode(0x03, 0),
        ];
        for r in &mut reports {
            r.finalize();
            let decoded = Report::from_bytes(&r.to_bytes()).unwrap();
            assert!(decoded.crc_valid());
            assert_eq!(decoded.crc, razer_transport::compute_crc(&decoded));
        }
    }

    #[test]
    fn test_device_type() {
        assert_eq!(device_type(device::PID_CHROMA_HDK), "Razer Chroma HDK");
        assert_eq!(device_type(0x0000), "Unknown Device");
        assert_eq!(device_type(0xFFFF), "Unknown Device");
    }

    #[test]
    fn test_effect_to_report() {
        assert_eq!(
            Effect::Static(Rgb::BLUE).to_report(VS, ZERO),
            effect_static(VS, ZERO, Rgb::BLUE)
        );
        assert_eq!(Effect::CustomFrame.to_report(VS, ZERO), effect_custom_frame());
        assert_eq!(Effect::BreathingDual(Rgb::RED, Rgb::GREEN).name(), "breath");
    }
}
