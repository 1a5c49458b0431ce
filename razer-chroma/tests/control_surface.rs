//! Control surface behaviour against a scripted transport.

use std::sync::Arc;

use razer_chroma::{ChromaDevice, PeripheralControlSurface};
use razer_transport::protocol::{class, cmd, offset, status, transaction};
use razer_transport::{crc_of, MockReply, MockTransport, Report};

fn surface() -> (Arc<MockTransport>, PeripheralControlSurface) {
    let mock = Arc::new(MockTransport::new());
    let device = ChromaDevice::open(mock.clone()).expect("chroma hdk profile");
    (mock, PeripheralControlSurface::new(device))
}

fn sent(mock: &MockTransport, index: usize) -> Report {
    Report::from_bytes(&mock.requests()[index]).expect("90-byte request")
}

#[test]
fn brightness_write_then_read_uses_cache() {
    let (mock, surface) = surface();
    assert_eq!(surface.read_matrix_brightness(), "255");

    surface.write_matrix_brightness(b"200");
    assert_eq!(mock.request_count(), 1);

    let req = sent(&mock, 0);
    assert_eq!(req.command_class, class::EXTENDED_MATRIX);
    assert_eq!(req.command_id, cmd::SET_BRIGHTNESS);
    assert_eq!(req.payload(), &[0x01, 0x00, 200]);

    assert_eq!(surface.read_matrix_brightness(), "200");
    assert_eq!(mock.request_count(), 1);
}

#[test]
fn brightness_cache_unchanged_on_failed_write() {
    let (mock, surface) = surface();
    mock.push_reply(MockReply::status(status::FAILURE));
    surface.write_matrix_brightness(b"10");
    assert_eq!(surface.read_matrix_brightness(), "255");
}

#[test]
fn brightness_rejects_garbage() {
    let (mock, surface) = surface();
    surface.write_matrix_brightness(b"bright");
    assert_eq!(mock.request_count(), 0);
}

#[test]
fn brightness_text_write_rejects_lone_whitespace() {
    let (mock, surface) = surface();
    surface.write_matrix_brightness(b"\n");
    surface.write_matrix_brightness(&[0x0A]);
    surface.write_matrix_brightness(&[0x20]);
    assert_eq!(mock.request_count(), 0);
    assert_eq!(surface.read_matrix_brightness(), "255");
}

#[test]
fn brightness_text_write_reads_digit_bytes_as_text() {
    let (mock, surface) = surface();
    surface.write_matrix_brightness(&[0x37]);
    assert_eq!(sent(&mock, 0).payload()[2], 7);
    assert_eq!(surface.read_matrix_brightness(), "7");
}

#[test]
fn brightness_raw_write_uses_byte_value() {
    let (mock, surface) = surface();
    surface.write_matrix_brightness_raw(&[0x37]);
    assert_eq!(sent(&mock, 0).payload()[2], 0x37);
    assert_eq!(surface.read_matrix_brightness(), "55");

    surface.write_matrix_brightness_raw(&[0x0A]);
    assert_eq!(surface.read_matrix_brightness(), "10");

    surface.write_matrix_brightness_raw(&[1, 2]);
    surface.write_matrix_brightness_raw(&[]);
    assert_eq!(mock.request_count(), 2);
}

#[test]
fn every_request_carries_valid_crc() {
    let (mock, surface) = surface();
    surface.write_matrix_effect_none(b"");
    surface.write_matrix_effect_spectrum(b"1");
    surface.write_matrix_effect_static(&[1, 2, 3]);
    surface.write_matrix_effect_breath(&[1, 2, 3, 4, 5, 6]);
    surface.write_matrix_effect_custom(b"");
    surface.write_matrix_custom_frame(&[0, 0, 1, 1, 2, 3, 4, 5, 6]);
    surface.write_device_mode(&[3, 0]);

    for raw in mock.requests() {
        assert_eq!(raw.len(), 90);
        assert_eq!(raw[offset::CRC], crc_of(&raw));
        assert_eq!(raw[offset::RESERVED], 0);
    }
    assert_eq!(mock.request_count(), 7);
}

#[test]
fn static_effect_requires_three_bytes() {
    let (mock, surface) = surface();
    surface.write_matrix_effect_static(&[1, 2]);
    surface.write_matrix_effect_static(&[1, 2, 3, 4]);
    assert_eq!(mock.request_count(), 0);

    surface.write_matrix_effect_static(&[0xFF, 0, 0]);
    let req = sent(&mock, 0);
    assert_eq!(req.data_size, 9);
    assert_eq!(&req.arguments[..9], &[1, 0, 1, 0, 0, 1, 0xFF, 0, 0]);
}

#[test]
fn breath_selection_by_length() {
    let (mock, surface) = surface();
    let lengths = [0usize, 1, 2, 3, 4, 5, 6, 7];
    for len in lengths {
        surface.write_matrix_effect_breath(&vec![0x40; len]);
    }
    let kinds: Vec<u8> = (0..lengths.len())
        .map(|i| sent(&mock, i).arguments[3])
        .collect();
    assert_eq!(kinds, vec![0, 0, 0, 1, 0, 0, 2, 0]);
}

#[test]
fn device_mode_requires_two_bytes() {
    let (mock, surface) = surface();
    surface.write_device_mode(&[3]);
    surface.write_device_mode(&[3, 0, 0]);
    assert_eq!(mock.request_count(), 0);

    surface.write_device_mode(&[5, 9]);
    let req = sent(&mock, 0);
    assert_eq!(req.command_id, cmd::SET_DEVICE_MODE);
    assert_eq!(req.payload(), &[0, 0]);
}

#[test]
fn reads_format_responses() {
    let (mock, surface) = surface();
    mock.push_reply(MockReply::with_arguments(&[2, 7]));
    assert_eq!(surface.read_firmware_version(), "v2.7");

    mock.push_reply(MockReply::with_arguments(b"PM2123H01234567\0\0"));
    assert_eq!(surface.read_device_serial(), "PM2123H01234567");

    mock.push_reply(MockReply::with_arguments(&[3, 0]));
    assert_eq!(surface.read_device_mode(), "3:0");

    assert_eq!(surface.read_device_type(), "Razer Chroma HDK");
    assert!(!surface.read_version().ends_with('\n'));
}

#[test]
fn reads_fall_back_on_error() {
    let (mock, surface) = surface();
    mock.push_reply(MockReply::Disconnected);
    assert_eq!(surface.read_firmware_version(), "v0.0");

    mock.push_reply(MockReply::status(status::NOT_SUPPORTED));
    assert_eq!(surface.read_device_serial(), "");

    mock.push_reply(MockReply::status(status::TIMEOUT));
    assert_eq!(surface.read_device_mode(), "0:0");
}

#[test]
fn mismatched_response_is_reported_not_fatal() {
    let (mock, surface) = surface();
    let mut other = Report::new_request(class::STANDARD, cmd::GET_SERIAL, 0x16);
    other.status = status::SUCCESS;
    mock.push_reply(MockReply::Raw(other.to_bytes().to_vec()));

    assert_eq!(surface.read_firmware_version(), "v0.0");
    // Next call works normally
    mock.push_reply(MockReply::with_arguments(&[1, 0]));
    assert_eq!(surface.read_firmware_version(), "v1.0");
}

#[test]
fn custom_frame_streams_rows_until_malformed() {
    let (mock, surface) = surface();
    let mut buf = vec![0x00, 0x00, 0x01, 0xFF, 0x00, 0x00, 0x00, 0xFF, 0x00];
    buf.extend_from_slice(&[0x01, 0x03, 0x02, 0xAA]);
    surface.write_matrix_custom_frame(&buf);

    assert_eq!(mock.request_count(), 1);
    let req = sent(&mock, 0);
    assert_eq!(req.transaction_id, transaction::CUSTOM_FRAME);
    assert_eq!(req.data_size, 11);
    assert_eq!(
        &req.arguments[..11],
        &[0x00, 0x00, 0x00, 0x00, 0x01, 0xFF, 0x00, 0x00, 0x00, 0xFF, 0x00]
    );
}

#[test]
fn custom_effect_is_volatile() {
    let (mock, surface) = surface();
    surface.write_matrix_effect_custom(b"1");
    let req = sent(&mock, 0);
    assert_eq!(req.transaction_id, transaction::EXTENDED_MATRIX);
    assert_eq!(&req.arguments[..3], &[0x00, 0x00, 0x08]);
}

#[test]
#[ignore] // requires hardware
fn hardware_firmware_version() {
    let transport = razer_transport::HidDiscovery::new()
        .open_first(None)
        .expect("No Chroma HDK found, plug in a supported device");
    let device = ChromaDevice::open(transport).expect("supported device");
    let surface = PeripheralControlSurface::new(device);
    let fw = surface.read_firmware_version();
    println!("firmware: {fw}");
    assert!(fw.starts_with('v'));
}
