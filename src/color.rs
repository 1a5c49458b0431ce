//! Colour and byte-string argument parsing

use razer_chroma::Rgb;

/// Parse a colour argument: `RRGGBB`, `#RRGGBB` or `r,g,b`
pub fn parse_color(s: &str) -> Result<Rgb, String> {
    let s = s.trim();

    if s.contains(',') {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [r, g, b] = parts.as_slice() else {
            return Err(format!("Expected r,g,b but got '{s}'"));
        };
        let channel = |v: &str| {
            v.parse::<u8>()
                .map_err(|e| format!("Invalid colour channel '{v}': {e}"))
        };
        return Ok(Rgb::new(channel(r)?, channel(g)?, channel(b)?));
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("Expected RRGGBB, #RRGGBB or r,g,b but got '{s}'"));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|e| format!("Invalid hex colour '{s}': {e}"))
    };
    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Parse a hex byte string, ignoring whitespace, `:` and an optional `0x`
pub fn parse_hex_bytes(s: &str) -> Result<Vec<u8>, String> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    let digits: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();

    if digits.len() % 2 != 0 {
        return Err(format!("Odd number of hex digits in '{s}'"));
    }
    if !digits.is_ascii() {
        return Err(format!("Invalid hex in '{s}'"));
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| format!("Invalid hex byte '{}': {e}", &digits[i..i + 2]))
        })
        .collect()
}
