//! Per-model capability table
//!
//! Everything that differs between devices lives in a [`DeviceProfile`]. The
//! table is consulted once when a session opens; commands never branch on the
//! product ID after that.

use serde::Serialize;

use razer_transport::protocol::{device, timing};
use razer_transport::WaitWindow;

use crate::effects::Effect;

/// Name reported for product IDs without a profile
pub const UNKNOWN_DEVICE_NAME: &str = "Unknown Device";

/// Which lighting effects a device accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EffectSupport {
    pub none: bool,
    pub static_color: bool,
    pub breathing: bool,
    pub spectrum: bool,
    pub custom_frame: bool,
}

impl EffectSupport {
    pub const ALL: Self = Self {
        none: true,
        static_color: true,
        breathing: true,
        spectrum: true,
        custom_frame: true,
    };

    pub fn supports(&self, effect: &Effect) -> bool {
        match effect {
            Effect::None => self.none,
            Effect::Static(_) => self.static_color,
            Effect::BreathingRandom | Effect::BreathingSingle(_) | Effect::BreathingDual(..) => {
                self.breathing
            }
            Effect::Spectrum => self.spectrum,
            Effect::CustomFrame => self.custom_frame,
        }
    }
}

/// Static description of one supported model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceProfile {
    pub product_id: u16,
    pub name: &'static str,
    pub wait_min_us: u64,
    pub wait_max_us: u64,
    /// LED rows (row IDs 0..rows)
    pub rows: u8,
    /// Columns per row (column IDs 0..columns)
    pub columns: u8,
    pub effects: EffectSupport,
}

impl DeviceProfile {
    pub fn wait(&self) -> WaitWindow {
        WaitWindow::from_micros(self.wait_min_us, self.wait_max_us)
    }

    /// Highest valid column ID
    pub fn max_column(&self) -> u8 {
        self.columns.saturating_sub(1)
    }
}

/// Razer Chroma HDK: 4 strips of 16 LEDs
pub const CHROMA_HDK: DeviceProfile = DeviceProfile {
    product_id: device::PID_CHROMA_HDK,
    name: "Razer Chroma HDK",
    wait_min_us: timing::CHROMA_HDK_WAIT_MIN_US,
    wait_max_us: timing::CHROMA_HDK_WAIT_MAX_US,
    rows: 4,
    columns: 16,
    effects: EffectSupport::ALL,
};

/// All known profiles
pub const PROFILES: &[DeviceProfile] = &[CHROMA_HDK];

/// Find the profile for a product ID
pub fn lookup(product_id: u16) -> Option<&'static DeviceProfile> {
    PROFILES.iter().find(|p| p.product_id == product_id)
}
