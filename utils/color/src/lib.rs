//! # Color Module
//!
//! ARGB color values as they appear in Adaptive Card host configurations
//! (`#AARRGGBB`, with `#RRGGBB` accepted as an opaque shorthand).
//!
//! Colors are plain `Copy` values. Host configuration stores colors as
//! strings, so parsing is fallible and happens when a semantic color is
//! resolved; constants can use the `const` [`Color::from_hex`].

use core::{
    fmt::{self, Display},
    str::FromStr,
};

mod parse;

use parse::{parse_hex_color, parse_hex_color_runtime};

/// Fraction of the remaining distance to white applied by [`Color::lighter`].
pub const LIGHTEN_FACTOR: f32 = 0.25;

/// Errors that can occur when parsing hexadecimal color strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// The provided string does not have 6 or 8 hexadecimal digits.
    #[error("expected 6 or 8 hexadecimal digits")]
    InvalidLength,
    /// A non-hexadecimal character was encountered at the provided index.
    #[error("invalid hexadecimal digit at byte index {0}")]
    InvalidDigit(usize),
}

/// A color with 8-bit alpha, red, green and blue channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Alpha channel (0 = transparent, 255 = opaque)
    pub alpha: u8,
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(0xFF, 0xFF, 0xFF);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Creates a color from its four channels.
    #[must_use]
    pub const fn new(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha,
            red,
            green,
            blue,
        }
    }

    /// Creates a fully opaque color.
    #[must_use]
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self::new(0xFF, red, green, blue)
    }

    /// Creates a color from a hexadecimal string at compile time.
    ///
    /// Panics if the string does not contain 6 or 8 hexadecimal digits.
    #[must_use]
    pub const fn from_hex(hex: &str) -> Self {
        let (alpha, red, green, blue) = parse_hex_color(hex);
        Self::new(alpha, red, green, blue)
    }

    /// Attempts to create a color from a hexadecimal string without panicking.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not contain 6 or 8 hexadecimal digits
    /// or contains invalid characters.
    pub fn try_from_hex(hex: &str) -> Result<Self, ColorError> {
        let (alpha, red, green, blue) = parse_hex_color_runtime(hex)?;
        Ok(Self::new(alpha, red, green, blue))
    }

    /// Creates a color from a packed 0xAARRGGBB value.
    #[must_use]
    pub const fn from_u32(argb: u32) -> Self {
        Self::new(
            ((argb >> 24) & 0xFF) as u8,
            ((argb >> 16) & 0xFF) as u8,
            ((argb >> 8) & 0xFF) as u8,
            (argb & 0xFF) as u8,
        )
    }

    /// Packs this color into a 0xAARRGGBB value.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        (self.alpha as u32) << 24
            | (self.red as u32) << 16
            | (self.green as u32) << 8
            | self.blue as u32
    }

    /// Returns a copy of this color with the provided alpha channel.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    /// Moves every color channel [`LIGHTEN_FACTOR`] of the way towards white.
    ///
    /// Alpha is preserved. Used to derive hover states from semantic colors.
    #[must_use]
    pub fn lighter(self) -> Self {
        Self::new(
            self.alpha,
            lighten_channel(self.red),
            lighten_channel(self.green),
            lighten_channel(self.blue),
        )
    }

    /// Linearly interpolates between this color and another color.
    #[must_use]
    pub fn lerp(self, other: Self, factor: f32) -> Self {
        let t = factor.clamp(0.0, 1.0);
        Self::new(
            lerp_channel(self.alpha, other.alpha, t),
            lerp_channel(self.red, other.red, t),
            lerp_channel(self.green, other.green, t),
            lerp_channel(self.blue, other.blue, t),
        )
    }
}

fn lighten_channel(value: u8) -> u8 {
    let headroom = f32::from(u8::MAX - value);
    value.saturating_add(to_channel(headroom * LIGHTEN_FACTOR))
}

fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    to_channel((f32::from(to) - f32::from(from)).mul_add(t, f32::from(from)))
}

fn to_channel(value: f32) -> u8 {
    let value = value.round().clamp(0.0, 255.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        value as u8
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.alpha, self.red, self.green, self.blue
        )
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_argb_and_rgb() {
        let argb = Color::try_from_hex("#800063B1").unwrap();
        assert_eq!(argb, Color::new(0x80, 0x00, 0x63, 0xB1));

        let rgb = Color::try_from_hex("0063B1").unwrap();
        assert_eq!(rgb, Color::opaque(0x00, 0x63, 0xB1));
        assert_eq!(Color::from_hex("#FF0063B1"), rgb);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Color::try_from_hex("#12345"), Err(ColorError::InvalidLength));
        assert_eq!(Color::try_from_hex(""), Err(ColorError::InvalidLength));
        assert_eq!(
            Color::try_from_hex("#FFGG0000"),
            Err(ColorError::InvalidDigit(3))
        );
    }

    #[test]
    fn lighter_moves_towards_white_and_keeps_alpha() {
        let accent = Color::from_hex("#FF0063B1");
        let light = accent.lighter();
        assert_eq!(light, Color::new(0xFF, 64, 138, 197));

        assert_eq!(Color::WHITE.lighter(), Color::WHITE);
        assert_eq!(Color::BLACK.with_alpha(0x40).lighter().alpha, 0x40);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let color = Color::from_u32(0xCC12_3456);
        let text = color.to_string();
        assert_eq!(text, "#CC123456");
        assert_eq!(text.parse::<Color>(), Ok(color));
        assert_eq!(color.to_u32(), 0xCC12_3456);
    }

    #[test]
    fn lerp_clamps_factor() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert_eq!(mid, Color::opaque(128, 128, 128));
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 4.0), Color::WHITE);
    }
}
