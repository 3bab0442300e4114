//! Color handling for indicator paints.
//!
//! Colors are packed 0xAARRGGBB integers. Transitions interpolate each
//! 8-bit channel independently, so an animation from opaque black to
//! opaque green never passes through a washed-out float rounding state.

use std::fmt;

use serde::Deserialize;

/// Packed ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color(u32);

impl Color {
    /// Solid black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Solid white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Mid gray, the default outline.
    pub const GRAY: Self = Self(0xFF88_8888);
    /// Pure green, the default "correct" color.
    pub const GREEN: Self = Self(0xFF00_FF00);
    /// Pure red, the default "incorrect" color.
    pub const RED: Self = Self(0xFFFF_0000);

    /// Creates a color from a packed 0xAARRGGBB value.
    #[must_use]
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    /// Creates an opaque color from RGB channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(0xFF, r, g, b)
    }

    /// Creates a color from ARGB channels.
    #[must_use]
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Returns the packed 0xAARRGGBB value.
    #[must_use]
    pub const fn to_argb(self) -> u32 {
        self.0
    }

    /// Alpha channel.
    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel.
    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Interpolates channel-wise between two colors.
    ///
    /// `t` is clamped to 0-1. Each channel is rounded to the nearest integer.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: u8, to: u8| -> u8 {
            let value = f32::from(from) + (f32::from(to) - f32::from(from)) * t;
            // Clamped to the u8 range above, so the cast cannot truncate.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let channel = value.round().clamp(0.0, 255.0) as u8;
            channel
        };
        Self::argb(
            mix(self.alpha(), other.alpha()),
            mix(self.red(), other.red()),
            mix(self.green(), other.green()),
            mix(self.blue(), other.blue()),
        )
    }

    /// Converts to normalized RGBA floats (0-1) for GPU upload.
    #[must_use]
    pub fn to_rgba_f32(self) -> [f32; 4] {
        [
            f32::from(self.red()) / 255.0,
            f32::from(self.green()) / 255.0,
            f32::from(self.blue()) / 255.0,
            f32::from(self.alpha()) / 255.0,
        ]
    }

    /// Parses `#RRGGBB` or `#AARRGGBB` (the leading `#` is optional).
    ///
    /// Six-digit values are treated as opaque.
    pub fn parse_hex(text: &str) -> Result<Self, String> {
        let digits = text.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid color `{text}`: not hexadecimal"));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| format!("invalid color `{text}`: not hexadecimal"))?;
        match digits.len() {
            6 => Ok(Self(0xFF00_0000 | value)),
            8 => Ok(Self(value)),
            _ => Err(format!("invalid color `{text}`: expected #RRGGBB or #AARRGGBB")),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

/// Accepted TOML spellings of a color.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Packed(u32),
}

impl TryFrom<ColorRepr> for Color {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(text) => Self::parse_hex(&text),
            ColorRepr::Packed(argb) => Ok(Self(argb)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels() {
        let color = Color::argb(0x80, 0x12, 0x34, 0x56);
        assert_eq!(color.to_argb(), 0x8012_3456);
        assert_eq!(color.alpha(), 0x80);
        assert_eq!(color.red(), 0x12);
        assert_eq!(color.green(), 0x34);
        assert_eq!(color.blue(), 0x56);
    }

    #[test]
    fn test_color_lerp_is_channel_wise() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert_eq!(mid.alpha(), 0xFF);
        assert_eq!(mid.red(), 128);
        assert_eq!(mid.green(), 128);
        assert_eq!(mid.blue(), 128);

        assert_eq!(Color::BLACK.lerp(Color::GREEN, 0.0), Color::BLACK);
        assert_eq!(Color::BLACK.lerp(Color::GREEN, 1.0), Color::GREEN);
        assert_eq!(Color::BLACK.lerp(Color::GREEN, 7.0), Color::GREEN);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse_hex("#FF0000"), Ok(Color::RED));
        assert_eq!(Color::parse_hex("80FF0000").map(Color::alpha), Ok(0x80));
        assert!(Color::parse_hex("#FFF").is_err());
        assert!(Color::parse_hex("#GGGGGG").is_err());
        assert!(Color::parse_hex("#+12345").is_err());
        assert!(Color::parse_hex("+FF0000").is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let color = Color::argb(0x7F, 1, 2, 3);
        assert_eq!(Color::parse_hex(&color.to_string()), Ok(color));
    }

    #[test]
    fn test_gpu_floats() {
        assert_eq!(Color::RED.to_rgba_f32(), [1.0, 0.0, 0.0, 1.0]);
    }
}
