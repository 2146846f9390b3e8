//! Boundary extraction: region -> polygon.
//!
//! Regions are reduced to the convex hull of their boundary pixels' cell
//! corners. Concave shapes are therefore drawn as their convex envelope;
//! holes and notches are not reproduced.
//!
//! Vertices sit on pixel corners, so a one-pixel-wide run still encloses
//! area. The cost is that two regions touching only diagonally share the
//! corner between them as a vertex.

use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use imageproc::geometry;
use imageproc::point::Point as LatticePoint;
use tracing::trace;

use crate::segment::Region;
use crate::types::{shoelace, Point, Polygon};

/// Reduce a region to a polygon around its outer boundary.
///
/// Returns `None` when the region has fewer than three distinct pixels.
pub fn extract_contour<R: Region + ?Sized>(region: &R) -> Option<Polygon> {
    if region.len() < 3 {
        trace!(index = region.index(), size = region.len(), "skipping degenerate region");
        return None;
    }

    let corners: Vec<Point> = boundary_pixels(region)
        .into_iter()
        .flat_map(Point::cell_corners)
        .collect();

    Polygon::new(convex_hull(&corners))
}

/// Pixels on the outer borders of the region, in scan order.
///
/// The region is rasterised into a binary mask (with a one-pixel margin) and
/// traced by border following; hole borders are ignored.
pub fn boundary_pixels<R: Region + ?Sized>(region: &R) -> Vec<Point> {
    let pixels = region.pixels();
    let Some(&first) = pixels.first() else {
        return Vec::new();
    };

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in pixels {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let width = (max_x - min_x + 3) as u32;
    let height = (max_y - min_y + 3) as u32;
    let mut mask = GrayImage::new(width, height);
    for p in pixels {
        mask.put_pixel((p.x - min_x + 1) as u32, (p.y - min_y + 1) as u32, Luma([255]));
    }

    let mut boundary: Vec<Point> = find_contours::<i32>(&mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .flat_map(|c| c.points)
        .map(|p| Point::new(p.x + min_x - 1, p.y + min_y - 1))
        .collect();
    boundary.sort_by(Point::scan_order);
    boundary.dedup();
    boundary
}

/// Convex hull of a point set.
///
/// Vertices run clockwise on a y-down raster, start at the lexicographically
/// smallest point and omit collinear points. Input order does not matter.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut lattice: Vec<LatticePoint<i32>> = points
        .iter()
        .map(|p| LatticePoint::new(p.x, p.y))
        .collect();
    lattice.sort_by_key(|p| (p.x, p.y));
    lattice.dedup();
    if lattice.len() < 3 {
        return lattice.into_iter().map(|p| Point::new(p.x, p.y)).collect();
    }

    let mut hull: Vec<Point> = geometry::convex_hull(lattice.as_slice())
        .into_iter()
        .map(|p| Point::new(p.x, p.y))
        .collect();

    if shoelace(&hull) < 0 {
        hull.reverse();
    }
    if let Some(start) = hull
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| **p)
        .map(|(i, _)| i)
    {
        hull.rotate_left(start);
    }
    hull
}
