//! Fill descriptions produced per shape.

use super::Colour;

/// A two-stop linear gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: Colour,
    pub end: Colour,
    /// Direction in radians from the positive x-axis (y grows downward).
    pub angle: f32,
}

/// The estimated colour field of a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientSpec {
    Solid(Colour),
    Linear(LinearGradient),
}

/// The fill attached to a polygon in the output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillResult {
    pub paint: GradientSpec,
    /// Mean alpha of the source region in `[0, 1]`.
    pub opacity: f32,
}

impl FillResult {
    pub fn new(paint: GradientSpec, opacity: f32) -> Self {
        Self {
            paint,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    pub fn solid(colour: Colour, opacity: f32) -> Self {
        Self::new(GradientSpec::Solid(colour), opacity)
    }
}
