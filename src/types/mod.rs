//! Core domain types for rastervec.
//!
//! - `Colour` - RGBA colour values
//! - `PixelGrid` - the immutable input raster
//! - `Point`, `Polygon` - integer geometry for shape boundaries
//! - `GradientSpec`, `FillResult` - per-shape fills

mod colour;
mod fill;
mod geometry;
mod grid;

pub use colour::Colour;
pub use fill::{FillResult, GradientSpec, LinearGradient};
pub(crate) use geometry::shoelace;
pub use geometry::{Point, Polygon};
pub use grid::{load_grid, PixelGrid};
