//! CSS Color Module Level 4: Color values, plus the stylesheet's color
//! transform functions (`darken`, `lighten`, `invert`, `mix`).
//! See <https://www.w3.org/TR/css-color-4/>
//!
//! Hex, named and the less common functional notations go through
//! `csscolorparser`; `rgb()`/`rgba()` are parsed here because they may wrap
//! another color (`rgba($accent, 0.5)`).

#![forbid(unsafe_code)]

use core::fmt;

use css_syntax::{function_call, split_top_level, split_whitespace_top_level};
use css_values_units::{fraction_from_str, number_from_str};

/// 8-bit RGBA channels.
pub type Rgba8Tuple = (u8, u8, u8, u8);

/// Parse a CSS <color> into 8-bit RGBA channels with `csscolorparser`.
///
/// Supports named colors, hex forms (`#rgb`/`#rgba`/`#rrggbb`/`#rrggbbaa`),
/// and functional notations like `hsl()`.
///
/// See <https://www.w3.org/TR/css-color-4/#typedef-color>
#[inline]
pub fn parse_css_color(input: &str) -> Option<Rgba8Tuple> {
    let parsed: csscolorparser::Color = input.parse().ok()?;
    let [red, green, blue, alpha] = parsed.to_rgba8();
    Some((red, green, blue, alpha))
}

/// Straight-alpha RGBA color, channels in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[inline]
    pub fn from_rgba8((red, green, blue, alpha): Rgba8Tuple) -> Self {
        Self::rgba(
            f32::from(red) / 255.0,
            f32::from(green) / 255.0,
            f32::from(blue) / 255.0,
            f32::from(alpha) / 255.0,
        )
    }

    pub fn to_rgba8(self) -> Rgba8Tuple {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        (
            channel(self.red),
            channel(self.green),
            channel(self.blue),
            channel(self.alpha),
        )
    }

    #[inline]
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Fully transparent colors draw nothing.
    #[inline]
    pub fn is_transparent(self) -> bool {
        self.alpha <= 0.0
    }

    /// Scale the color channels toward black: `rgb * (1 - amount)`.
    #[must_use]
    pub fn darken(self, amount: f32) -> Self {
        let keep = 1.0 - amount.clamp(0.0, 1.0);
        Self::rgba(self.red * keep, self.green * keep, self.blue * keep, self.alpha)
    }

    /// Move the color channels toward white: `rgb + (1 - rgb) * amount`.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let toward_white = |value: f32| (1.0 - value).mul_add(amount, value);
        Self::rgba(
            toward_white(self.red),
            toward_white(self.green),
            toward_white(self.blue),
            self.alpha,
        )
    }

    /// Invert the color channels, keeping alpha.
    #[must_use]
    pub fn invert(self) -> Self {
        Self::rgba(1.0 - self.red, 1.0 - self.green, 1.0 - self.blue, self.alpha)
    }

    /// Interpolate every channel, alpha included, `progress` of the way toward `other`.
    #[must_use]
    pub fn mix(self, other: Self, progress: f32) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        let lerp = |from: f32, to: f32| (to - from).mul_add(progress, from);
        Self::rgba(
            lerp(self.red, other.red),
            lerp(self.green, other.green),
            lerp(self.blue, other.blue),
            lerp(self.alpha, other.alpha),
        )
    }

    /// Parse any color the stylesheet language accepts: hex, named colors,
    /// `rgb()`/`rgba()` (optionally wrapping another color), raw float tuples
    /// (`1, 0.5, 0` or `1 0.5 0 1`), and the transform functions, nested to
    /// any depth.
    ///
    /// ```
    /// use css_color::Color;
    /// let color = Color::parse("darken(#ffffff, 50%)").unwrap_or_default();
    /// assert_eq!(color.to_rgba8(), (128, 128, 128, 255));
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some((name, arguments)) = function_call(trimmed) {
            return parse_function(trimmed, &name.to_ascii_lowercase(), arguments);
        }
        if let Some(color) = parse_float_tuple(trimmed) {
            return Some(color);
        }
        parse_css_color(trimmed).map(Self::from_rgba8)
    }

    /// `#rrggbbaa` form.
    pub fn to_hex(self) -> String {
        let (red, green, blue, alpha) = self.to_rgba8();
        format!("#{red:02x}{green:02x}{blue:02x}{alpha:02x}")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (red, green, blue, _) = self.to_rgba8();
        write!(formatter, "rgba({red}, {green}, {blue}, {})", self.alpha)
    }
}

/// Dispatch a functional color by lowercased `name`.
fn parse_function(whole: &str, name: &str, arguments: &str) -> Option<Color> {
    let parts = split_top_level(arguments, ',');
    match (name, parts.as_slice()) {
        ("rgb" | "rgba", [color, alpha]) => {
            Some(Color::parse(color)?.with_alpha(fraction_from_str(alpha)?))
        }
        ("rgb" | "rgba", [red, green, blue]) => {
            Some(Color::rgba(channel(red)?, channel(green)?, channel(blue)?, 1.0))
        }
        ("rgb" | "rgba", [red, green, blue, alpha]) => Some(Color::rgba(
            channel(red)?,
            channel(green)?,
            channel(blue)?,
            fraction_from_str(alpha)?,
        )),
        ("darken", [color, amount]) => Some(Color::parse(color)?.darken(fraction_from_str(amount)?)),
        ("lighten", [color, amount]) => {
            Some(Color::parse(color)?.lighten(fraction_from_str(amount)?))
        }
        ("invert", [color]) => Some(Color::parse(color)?.invert()),
        ("mix", [first, second]) => Some(Color::parse(first)?.mix(Color::parse(second)?, 0.5)),
        ("mix", [first, second, amount]) => Some(
            Color::parse(first)?.mix(Color::parse(second)?, fraction_from_str(amount)?),
        ),
        // Space-separated `rgb(255 0 0 / 50%)`, `hsl()`, `hwb()` and friends.
        _ => parse_css_color(whole).map(Color::from_rgba8),
    }
}

/// An `rgb()` channel: `0..=255` number or a percentage.
fn channel(text: &str) -> Option<f32> {
    if text.trim_end().ends_with('%') {
        return fraction_from_str(text);
    }
    number_from_str(text).map(|value| value / 255.0)
}

/// Three or four bare floats in `0.0..=1.0`, comma or space separated.
fn parse_float_tuple(text: &str) -> Option<Color> {
    let pieces: Vec<&str> = if text.contains(',') {
        split_top_level(text, ',')
    } else {
        split_whitespace_top_level(text)
    };
    let values = pieces
        .iter()
        .map(|piece| number_from_str(piece))
        .collect::<Option<Vec<f32>>>()?;
    match values.as_slice() {
        [red, green, blue] => Some(Color::rgba(*red, *green, *blue, 1.0)),
        [red, green, blue, alpha] => Some(Color::rgba(*red, *green, *blue, *alpha)),
        _ => None,
    }
}
