//! rastervec - Raster to vector conversion
//!
//! Partitions the opaque pixels of an RGBA raster into regions, reduces each
//! region to a polygon, estimates a solid or linear-gradient fill and
//! assembles the result into an SVG document.

pub mod cli;
pub mod config;
pub mod contour;
pub mod document;
pub mod error;
pub mod gradient;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod segment;
pub mod types;

pub use config::{Config, GradientConfig, GroupingMode, ProximityConfig, CONFIG_FILENAME};
pub use contour::{convex_hull, extract_contour};
pub use document::{
    to_svg, write_svg, DocumentAssembler, DocumentSummary, Element, ElementShape, FillRef,
    GradientDef, OutputDocument,
};
pub use error::{Result, RvError};
pub use gradient::GradientEstimator;
pub use pipeline::convert;
pub use segment::{Cluster, ProximityClusterer, Region, ShapeMask, ShapeSegmenter};
pub use types::{
    load_grid, Colour, FillResult, GradientSpec, LinearGradient, PixelGrid, Point, Polygon,
};
