//! Pixel grouping strategies.
//!
//! Both strategies partition the opaque pixels of a `PixelGrid` into
//! disjoint regions:
//! - `ShapeSegmenter` - 4-connected components of the opacity bitmap
//! - `ProximityClusterer` - density-based clusters, colour ignored

mod cluster;
mod shapes;

pub use cluster::{Cluster, ProximityClusterer, DEFAULT_EPS, DEFAULT_MIN_POINTS};
pub use shapes::{ShapeMask, ShapeSegmenter, DEFAULT_MIN_SHAPE_PIXELS};

use crate::types::Point;

/// Read-only view over a group of pixels.
pub trait Region {
    /// Stable sequence index assigned when the region was created.
    fn index(&self) -> usize;

    /// Member pixels in row-major order.
    fn pixels(&self) -> &[Point];

    /// Check membership of a pixel coordinate.
    fn contains(&self, p: Point) -> bool;

    fn len(&self) -> usize {
        self.pixels().len()
    }

    fn is_empty(&self) -> bool {
        self.pixels().is_empty()
    }
}

/// A deduplicated pixel set with a bounding-box bitmap for membership tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PixelSet {
    points: Vec<Point>,
    origin: Point,
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl PixelSet {
    pub(crate) fn new(mut points: Vec<Point>) -> Self {
        points.sort_by(Point::scan_order);
        points.dedup();

        let Some(&first) = points.first() else {
            return Self {
                points,
                origin: Point::new(0, 0),
                width: 0,
                height: 0,
                bits: Vec::new(),
            };
        };

        let (mut min_x, mut max_x) = (first.x, first.x);
        let (mut min_y, mut max_y) = (first.y, first.y);
        for p in &points {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        let width = (max_x - min_x + 1) as usize;
        let height = (max_y - min_y + 1) as usize;
        let mut bits = vec![false; width * height];
        for p in &points {
            bits[(p.y - min_y) as usize * width + (p.x - min_x) as usize] = true;
        }

        Self {
            points,
            origin: Point::new(min_x, min_y),
            width,
            height,
            bits,
        }
    }

    pub(crate) fn points(&self) -> &[Point] {
        &self.points
    }

    pub(crate) fn contains(&self, p: Point) -> bool {
        let dx = p.x - self.origin.x;
        let dy = p.y - self.origin.y;
        if dx < 0 || dy < 0 || dx as usize >= self.width || dy as usize >= self.height {
            return false;
        }
        self.bits[dy as usize * self.width + dx as usize]
    }
}
