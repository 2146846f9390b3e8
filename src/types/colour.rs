//! Colour type and colour statistics.

use std::fmt;

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a colour from an `[r, g, b, a]` sample.
    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Convert to RGBA tuple.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// The colour channels without alpha.
    pub fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Check if the colour is fully transparent.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Alpha normalised to `[0, 1]`.
    pub fn opacity(self) -> f32 {
        self.a as f32 / 255.0
    }

    /// Grayscale intensity in `[0, 1]`.
    ///
    /// Rec. 709 luminance of the linearised sRGB channels.
    pub fn intensity(self) -> f32 {
        use palette::{LinSrgb, Srgb};

        let rgb: Srgb<f32> = Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        );
        let linear: LinSrgb<f32> = rgb.into_linear();

        0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
    }

    /// Channel-wise arithmetic mean of a set of colours.
    ///
    /// Returns `None` for an empty iterator.
    pub fn mean<I>(colours: I) -> Option<Self>
    where
        I: IntoIterator<Item = Colour>,
    {
        let mut sums = [0u64; 4];
        let mut count = 0u64;
        for colour in colours {
            for (sum, channel) in sums.iter_mut().zip(colour.to_rgba()) {
                *sum += channel as u64;
            }
            count += 1;
        }

        if count == 0 {
            return None;
        }

        let avg = |sum: u64| ((sum as f64 / count as f64).round()) as u8;
        Some(Self::new(avg(sums[0]), avg(sums[1]), avg(sums[2]), avg(sums[3])))
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}
