//! Setting command handlers.

use anyhow::{bail, Result};
use razer_chroma::{ChromaDevice, Effect, FrameSummary, Rgb};

use chroma_driver::color::{parse_color, parse_hex_bytes};

use super::{CommandResult, Context};

fn color(s: &str) -> Result<Rgb> {
    parse_color(s).map_err(anyhow::Error::msg)
}

pub fn set_brightness(ctx: &Context, value: u8) -> CommandResult {
    let device = ctx.open_device()?;
    device.set_brightness(value)?;
    println!("Brightness set to {value}");
    Ok(())
}

pub fn set_mode(ctx: &Context, mode: u8, param: u8) -> CommandResult {
    let device = ctx.open_device()?;
    device.set_device_mode(mode, param)?;
    println!("Device mode set");
    Ok(())
}

/// Map the effect subcommand to an effect value
pub fn effect_from_args(effect: &crate::cli::EffectCommands) -> Result<Effect> {
    use crate::cli::EffectCommands;

    Ok(match effect {
        EffectCommands::None => Effect::None,
        EffectCommands::Spectrum => Effect::Spectrum,
        EffectCommands::Static { color: c } => Effect::Static(color(c)?),
        EffectCommands::Breath { colors } => match colors.as_slice() {
            [] => Effect::BreathingRandom,
            [a] => Effect::BreathingSingle(color(a)?),
            [a, b] => Effect::BreathingDual(color(a)?, color(b)?),
            _ => bail!("Breathing takes at most two colours"),
        },
        EffectCommands::Custom => Effect::CustomFrame,
    })
}

pub fn effect(ctx: &Context, effect: crate::cli::EffectCommands) -> CommandResult {
    let effect = effect_from_args(&effect)?;
    let device = ctx.open_device()?;
    device.set_effect(effect)?;
    println!("Effect set to {}", effect.name());
    Ok(())
}

/// Frame buffer for one row of consecutive colours
pub fn row_buffer(row: u8, start: u8, colors: &[Rgb]) -> Result<Vec<u8>> {
    if colors.is_empty() {
        bail!("At least one colour is required");
    }
    let stop = start as usize + colors.len() - 1;
    let Ok(stop) = u8::try_from(stop) else {
        bail!("Row overflows column 255 ({} colours from column {start})", colors.len());
    };

    let mut buf = Vec::with_capacity(3 + colors.len() * 3);
    buf.extend_from_slice(&[row, start, stop]);
    for c in colors {
        buf.extend_from_slice(&c.to_bytes());
    }
    Ok(buf)
}

fn write_and_show(device: &ChromaDevice, buf: &[u8], activate: bool) -> Result<FrameSummary> {
    let summary = device.write_frame(buf);
    if let Some(stop) = summary.stop {
        eprintln!("Frame parsing stopped: {stop}");
    }
    if activate {
        device.set_effect(Effect::CustomFrame)?;
    }
    Ok(summary)
}

pub fn frame(ctx: &Context, row: u8, start: u8, colors: &[String]) -> CommandResult {
    let colors = colors
        .iter()
        .map(|c| color(c))
        .collect::<Result<Vec<_>>>()?;
    let buf = row_buffer(row, start, &colors)?;

    let device = ctx.open_device()?;
    let profile = device.profile();
    if row >= profile.rows || buf[2] > profile.max_column() {
        bail!(
            "Row {row} columns {start}-{} outside the {}x{} matrix",
            buf[2],
            profile.rows,
            profile.columns
        );
    }

    let summary = write_and_show(&device, &buf, true)?;
    println!("Sent {} row(s)", summary.rows_sent);
    Ok(())
}

pub fn frame_raw(ctx: &Context, hex: &str, activate: bool) -> CommandResult {
    let buf = parse_hex_bytes(hex).map_err(anyhow::Error::msg)?;
    let device = ctx.open_device()?;
    let summary = write_and_show(&device, &buf, activate)?;
    println!(
        "Sent {} row(s), {} failed",
        summary.rows_sent, summary.rows_failed
    );
    Ok(())
}
