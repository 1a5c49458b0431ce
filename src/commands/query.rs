//! Query (read-only) command handlers.

use serde_json::json;

use super::{emit, CommandResult, Context};

/// Show everything the device reports about itself
pub fn info(ctx: &Context) -> CommandResult {
    let device = ctx.open_device()?;
    let info = device.transport().device_info();
    let firmware = device.firmware_version()?;
    let serial = device.serial()?;
    let mode = device.device_mode()?;

    if ctx.json {
        let value = json!({
            "vid": info.vid,
            "pid": info.pid,
            "device_type": device.device_type(),
            "firmware": firmware.to_string(),
            "serial": serial,
            "mode": mode,
            "profile": device.profile(),
        });
        println!("{value}");
        return Ok(());
    }

    let profile = device.profile();
    println!("Device:   {} ({:04X}:{:04X})", device.device_type(), info.vid, info.pid);
    println!("Firmware: {firmware}");
    println!("Serial:   {serial}");
    println!("Mode:     {mode}");
    println!("Matrix:   {} rows x {} columns", profile.rows, profile.columns);
    Ok(())
}

/// Get matrix brightness from the device
pub fn brightness(ctx: &Context) -> CommandResult {
    let device = ctx.open_device()?;
    emit(ctx.json, &device.query_brightness()?)
}

pub fn firmware(ctx: &Context) -> CommandResult {
    let device = ctx.open_device()?;
    emit(ctx.json, &device.firmware_version()?)
}

pub fn serial(ctx: &Context) -> CommandResult {
    let device = ctx.open_device()?;
    emit(ctx.json, &device.serial()?)
}

pub fn device_type(ctx: &Context) -> CommandResult {
    let device = ctx.open_device()?;
    emit(ctx.json, &device.device_type())
}

pub fn mode(ctx: &Context) -> CommandResult {
    let device = ctx.open_device()?;
    emit(ctx.json, &device.device_mode()?)
}
