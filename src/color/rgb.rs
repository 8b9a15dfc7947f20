//! RGB color triple used both as a derived attribute and as a palette key

use std::fmt;

/// Number of channels in an RGB pixel
pub const CHANNELS: usize = 3;

/// An 8-bit RGB color
///
/// Ordering is lexicographic over (red, green, blue) so colors can be sorted
/// deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Color {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
}

impl Color {
    /// Create a color from its channels
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Channels as an array in R, G, B order
    pub const fn channels(self) -> [u8; CHANNELS] {
        [self.red, self.green, self.blue]
    }

    /// Channel value along `axis` (0 = red, 1 = green, anything else = blue)
    pub const fn channel(self, axis: usize) -> u8 {
        match axis {
            0 => self.red,
            1 => self.green,
            _ => self.blue,
        }
    }

    /// Squared Euclidean distance in RGB space
    ///
    /// The largest possible value is `3 * 255^2`, which fits in a `u32`.
    pub const fn squared_distance(self, other: Self) -> u32 {
        let red = self.red.abs_diff(other.red) as u32;
        let green = self.green.abs_diff(other.green) as u32;
        let blue = self.blue.abs_diff(other.blue) as u32;
        red * red + green * green + blue * blue
    }
}

impl From<[u8; CHANNELS]> for Color {
    fn from([red, green, blue]: [u8; CHANNELS]) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<Color> for [u8; CHANNELS] {
    fn from(color: Color) -> Self {
        color.channels()
    }
}

impl From<image::Rgb<u8>> for Color {
    fn from(pixel: image::Rgb<u8>) -> Self {
        Self::from(pixel.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.red, self.green, self.blue)
    }
}
