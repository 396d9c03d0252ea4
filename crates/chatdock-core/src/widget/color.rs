//! Readable text color for a brand background.

pub const WHITE: &str = "#FFFFFF";
pub const BLACK: &str = "#000000";

/// Text color to draw on top of `hex_color`.
///
/// Missing or malformed colors (anything but six hex digits after an
/// optional `#`) get white. Otherwise colors whose weighted luminance is
/// strictly above 0.5 get black, the rest white.
pub fn contrast_color(hex_color: Option<&str>) -> &'static str {
    match parse_hex_rgb(hex_color.unwrap_or_default()) {
        Some(rgb) => text_color_for(luminance(rgb)),
        None => WHITE,
    }
}

/// Black above 0.5 luminance, white at or below it.
pub fn text_color_for(luminance: f64) -> &'static str {
    if luminance > 0.5 { BLACK } else { WHITE }
}

/// Parse `#RRGGBB` / `RRGGBB` into its channels.
pub fn parse_hex_rgb(hex_color: &str) -> Option<(u8, u8, u8)> {
    let digits = hex_color.replacen('#', "", 1);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Perceived luminance in `0.0..=1.0`.
pub fn luminance((r, g, b): (u8, u8, u8)) -> f64 {
    (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0
}
