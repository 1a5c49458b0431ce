//! Lighting control for Razer Chroma devices
//!
//! This crate sits on top of `razer-transport` and provides:
//!
//! - [`effects`]: pure builders for every lighting and device command
//! - [`frame`]: splitting a custom frame buffer into row reports
//! - [`session::ChromaDevice`]: a transport bound to its device profile
//! - [`surface::PeripheralControlSurface`]: attribute-style byte/string access

pub mod effects;
pub mod error;
pub mod frame;
pub mod led;
pub mod profile;
pub mod session;
pub mod surface;

pub use effects::{breathing_from_bytes, device_type, Effect};
pub use error::DeviceError;
pub use frame::{assemble, FrameStop, RowFrames, RowSegment};
pub use led::{LedId, Rgb, Storage};
pub use profile::{DeviceProfile, EffectSupport};
pub use session::{ChromaDevice, DeviceMode, FirmwareVersion, FrameSummary};
pub use surface::PeripheralControlSurface;
