//! Device discovery for Razer Chroma devices

use std::sync::Arc;

use hidapi::HidApi;
use tracing::{debug, info};

use crate::device_registry;
use crate::error::TransportError;
use crate::hid_usb::HidUsbTransport;
use crate::printer::{PrinterConfig, PrinterTransport};
use crate::protocol::device;
use crate::types::{DiscoveredDevice, TransportDeviceInfo, TransportType};
use crate::Transport;

/// HID device discovery for USB-attached devices
pub struct HidDiscovery {
    /// Known VID/PID pairs to look for
    known_devices: Vec<(u16, u16)>,
    /// Optional printer config for monitoring mode - wraps transports automatically
    printer_config: Option<PrinterConfig>,
}

impl Default for HidDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl HidDiscovery {
    /// Create a new HID discovery instance
    pub fn new() -> Self {
        Self {
            known_devices: device_registry::SUPPORTED_PIDS
                .iter()
                .map(|&pid| (device_registry::VENDOR_ID, pid))
                .collect(),
            printer_config: None,
        }
    }

    /// Create with printer config for monitoring mode
    /// All transports opened via open_device() will be wrapped with PrinterTransport
    pub fn with_printer_config(config: PrinterConfig) -> Self {
        Self {
            printer_config: Some(config),
            ..Self::new()
        }
    }

    /// Add a VID/PID pair to discover
    pub fn add_device(&mut self, vid: u16, pid: u16) {
        if !self.known_devices.contains(&(vid, pid)) {
            self.known_devices.push((vid, pid));
        }
    }

    /// Check if a device matches our known devices
    fn is_known_device(&self, vid: u16, pid: u16) -> bool {
        self.known_devices.contains(&(vid, pid))
    }

    fn is_control_interface(device_info: &hidapi::DeviceInfo) -> bool {
        device_info.interface_number() == device::CONTROL_INTERFACE
    }

    /// List currently attached devices
    pub fn list_devices(&self) -> Result<Vec<DiscoveredDevice>, TransportError> {
        let api = HidApi::new().map_err(|e| TransportError::HidError(e.to_string()))?;
        let mut devices = Vec::new();

        for device_info in api.device_list() {
            let vid = device_info.vendor_id();
            let pid = device_info.product_id();

            if !self.is_known_device(vid, pid) || !Self::is_control_interface(device_info) {
                continue;
            }

            let path = device_info.path().to_string_lossy().to_string();
            let serial = device_info.serial_number().map(|s| s.to_string());
            let product_name = device_info.product_string().map(|s| s.to_string());

            debug!("Found device: VID={:04X} PID={:04X} path={}", vid, pid, path);

            devices.push(DiscoveredDevice {
                info: TransportDeviceInfo {
                    vid,
                    pid,
                    interface: device_info.interface_number(),
                    transport_type: TransportType::HidUsb,
                    device_path: path,
                    serial,
                    product_name,
                },
            });
        }

        info!("Found {} devices", devices.len());
        Ok(devices)
    }

    /// Open a specific device
    pub fn open_device(
        &self,
        device: &DiscoveredDevice,
    ) -> Result<Arc<dyn Transport>, TransportError> {
        let api = HidApi::new().map_err(|e| TransportError::HidError(e.to_string()))?;

        let control_info = api
            .device_list()
            .find(|d| {
                d.vendor_id() == device.info.vid
                    && d.product_id() == device.info.pid
                    && d.path().to_string_lossy() == device.info.device_path
            })
            .ok_or_else(|| {
                TransportError::DeviceNotFound(format!(
                    "Control interface for {:04X}:{:04X}",
                    device.info.vid, device.info.pid
                ))
            })?;

        let hid_device = control_info
            .open_device(&api)
            .map_err(TransportError::from)?;

        let transport: Arc<dyn Transport> =
            Arc::new(HidUsbTransport::new(hid_device, device.info.clone()));

        info!(
            "Opened {:?} transport for {:04X}:{:04X}",
            device.info.transport_type, device.info.vid, device.info.pid
        );

        // Wrap with printer if monitoring is enabled
        let transport = match &self.printer_config {
            Some(config) => PrinterTransport::wrap(transport, config.clone()),
            None => transport,
        };

        Ok(transport)
    }

    /// Open the first attached device, preferring `product_id` when given
    pub fn open_first(&self, product_id: Option<u16>) -> Result<Arc<dyn Transport>, TransportError> {
        let devices = self.list_devices()?;

        let chosen = product_id
            .and_then(|pid| devices.iter().find(|d| d.info.pid == pid))
            .or_else(|| devices.first())
            .ok_or_else(|| TransportError::DeviceNotFound("No supported device found".into()))?;

        self.open_device(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_devices_include_chroma_hdk() {
        let discovery = HidDiscovery::new();
        assert!(discovery.is_known_device(0x1532, 0x0F09));
        assert!(!discovery.is_known_device(0x1532, 0x1234));
    }

    #[test]
    fn test_add_device_deduplicates() {
        let mut discovery = HidDiscovery::new();
        discovery.add_device(0x1532, 0x1234);
        discovery.add_device(0x1532, 0x1234);
        assert!(discovery.is_known_device(0x1532, 0x1234));
        assert_eq!(discovery.known_devices.len(), 2);
    }
}
