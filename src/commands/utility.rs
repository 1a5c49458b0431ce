//! Utility command handlers.

use std::path::Path;

use anyhow::bail;
use razer_chroma::surface::DRIVER_VERSION;
use razer_chroma::PeripheralControlSurface;
use serde_json::json;

use chroma_driver::color::parse_hex_bytes;

use super::{CommandResult, Context};

/// List attached devices
pub fn list(ctx: &Context) -> CommandResult {
    let devices = ctx.discovery().list_devices()?;

    if ctx.json {
        println!("{}", serde_json::to_string(&devices)?);
        return Ok(());
    }

    if devices.is_empty() {
        println!("No supported devices found");
        return Ok(());
    }
    for d in &devices {
        println!(
            "  VID={:04x} PID={:04x} if={} {} serial={} path={}",
            d.info.vid,
            d.info.pid,
            d.info.interface,
            razer_chroma::device_type(d.info.pid),
            d.info.serial.as_deref().unwrap_or("-"),
            d.info.device_path
        );
    }
    Ok(())
}

/// Print (and optionally save) the effective configuration
pub fn config(ctx: &Context, path: &Path, save: bool) -> CommandResult {
    if save {
        ctx.config.save(path)?;
        println!("Saved to {}", path.display());
    }
    if ctx.json {
        let value = json!({ "path": path, "config": ctx.config });
        println!("{value}");
    } else {
        println!("# {}", path.display());
        print!("{}", toml::to_string_pretty(&ctx.config)?);
    }
    Ok(())
}

pub fn version() {
    println!("{DRIVER_VERSION}");
}

/// Attributes that can be read
const READABLE: &[&str] = &[
    "matrix_brightness",
    "firmware_version",
    "device_type",
    "device_serial",
    "device_mode",
    "version",
];

/// Read or write one attribute through the control surface
pub fn attr(ctx: &Context, name: &str, value: Option<&str>, ascii: bool) -> CommandResult {
    let surface = PeripheralControlSurface::new(ctx.open_device()?);

    let Some(value) = value else {
        let out = match name {
            "matrix_brightness" => surface.read_matrix_brightness(),
            "firmware_version" => surface.read_firmware_version(),
            "device_type" => surface.read_device_type(),
            "device_serial" => surface.read_device_serial(),
            "device_mode" => surface.read_device_mode(),
            "version" => surface.read_version(),
            _ => bail!("'{name}' is not readable (readable: {})", READABLE.join(", ")),
        };
        println!("{out}");
        return Ok(());
    };

    let input = if ascii {
        value.as_bytes().to_vec()
    } else {
        parse_hex_bytes(value).map_err(anyhow::Error::msg)?
    };

    write_attr(&surface, name, &input, ascii)
}

/// Dispatch one attribute write. `ascii` selects the text form of
/// `matrix_brightness`; otherwise the value is a single raw byte.
fn write_attr(
    surface: &PeripheralControlSurface,
    name: &str,
    input: &[u8],
    ascii: bool,
) -> CommandResult {
    match name {
        "matrix_brightness" if ascii => surface.write_matrix_brightness(input),
        "matrix_brightness" => surface.write_matrix_brightness_raw(input),
        "device_mode" => surface.write_device_mode(input),
        "matrix_effect_none" => surface.write_matrix_effect_none(input),
        "matrix_effect_spectrum" => surface.write_matrix_effect_spectrum(input),
        "matrix_effect_static" => surface.write_matrix_effect_static(input),
        "matrix_effect_breath" => surface.write_matrix_effect_breath(input),
        "matrix_effect_custom" => surface.write_matrix_effect_custom(input),
        "matrix_custom_frame" => surface.write_matrix_custom_frame(input),
        _ => bail!("'{name}' is not writable"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use razer_chroma::ChromaDevice;
    use razer_transport::protocol::offset;
    use razer_transport::MockTransport;

    fn mock_surface() -> (Arc<MockTransport>, PeripheralControlSurface) {
        let mock = Arc::new(MockTransport::new());
        let device = ChromaDevice::open(mock.clone()).unwrap();
        (mock, PeripheralControlSurface::new(device))
    }

    #[test]
    fn test_hex_brightness_is_raw_byte() {
        let (mock, surface) = mock_surface();
        let input = parse_hex_bytes("37").unwrap();
        write_attr(&surface, "matrix_brightness", &input, false).unwrap();
        assert_eq!(mock.last_request().unwrap()[offset::ARGUMENTS + 2], 0x37);
        assert_eq!(surface.read_matrix_brightness(), "55");
    }

    #[test]
    fn test_ascii_brightness_is_decimal() {
        let (mock, surface) = mock_surface();
        write_attr(&surface, "matrix_brightness", b"37", true).unwrap();
        assert_eq!(mock.last_request().unwrap()[offset::ARGUMENTS + 2], 37);
    }

    #[test]
    fn test_unknown_attr_rejected() {
        let (mock, surface) = mock_surface();
        assert!(write_attr(&surface, "firmware_version", &[1], false).is_err());
        assert_eq!(mock.request_count(), 0);
    }
}
