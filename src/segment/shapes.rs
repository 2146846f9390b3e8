//! Connected-component segmentation of the opacity bitmap.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::types::{PixelGrid, Point};

use super::{PixelSet, Region};

/// Components smaller than this many pixels are treated as noise.
pub const DEFAULT_MIN_SHAPE_PIXELS: usize = 4;

/// One 4-connected region of opaque pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMask {
    index: usize,
    pixels: PixelSet,
}

impl Region for ShapeMask {
    fn index(&self) -> usize {
        self.index
    }

    fn pixels(&self) -> &[Point] {
        self.pixels.points()
    }

    fn contains(&self, p: Point) -> bool {
        self.pixels.contains(p)
    }
}

/// Labels 4-connected opaque regions of a grid.
#[derive(Debug, Clone, Copy)]
pub struct ShapeSegmenter {
    min_pixels: usize,
}

impl Default for ShapeSegmenter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SHAPE_PIXELS)
    }
}

impl ShapeSegmenter {
    pub fn new(min_pixels: usize) -> Self {
        Self { min_pixels }
    }

    /// Segment the grid into shape masks.
    ///
    /// Components are discovered in row-major scan order of their first
    /// pixel. Components below the size threshold are dropped before
    /// sequence indices are assigned, so indices are contiguous.
    pub fn segment(&self, grid: &PixelGrid) -> Vec<ShapeMask> {
        let (width, height) = (grid.width(), grid.height());
        let mut visited = vec![false; width * height];
        let mut masks = Vec::new();
        let mut dropped = 0usize;

        for y in 0..height {
            for x in 0..width {
                let idx = y * width + x;
                if visited[idx] || !grid.is_opaque_at(x, y) {
                    continue;
                }

                let component = flood_fill(grid, x, y, &mut visited);
                if component.len() < self.min_pixels {
                    trace!(x, y, size = component.len(), "dropping noise component");
                    dropped += 1;
                    continue;
                }

                masks.push(ShapeMask {
                    index: masks.len(),
                    pixels: PixelSet::new(component),
                });
            }
        }

        debug!(shapes = masks.len(), dropped, "segmented opacity bitmap");
        masks
    }
}

/// Collect the 4-connected opaque component containing `(start_x, start_y)`.
fn flood_fill(
    grid: &PixelGrid,
    start_x: usize,
    start_y: usize,
    visited: &mut [bool],
) -> Vec<Point> {
    let width = grid.width();
    let height = grid.height();
    let mut queue = VecDeque::new();
    let mut component = Vec::new();

    queue.push_back((start_x, start_y));
    visited[start_y * width + start_x] = true;

    while let Some((x, y)) = queue.pop_front() {
        component.push(Point::new(x as i32, y as i32));

        let neighbours = [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ];
        for (nx, ny) in neighbours {
            if nx >= width || ny >= height {
                continue;
            }
            let nidx = ny * width + nx;
            if !visited[nidx] && grid.is_opaque_at(nx, ny) {
                visited[nidx] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    component
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;
    use std::collections::HashSet;

    const RED: Colour = Colour::rgb(255, 0, 0);
    const BLUE: Colour = Colour::rgb(0, 0, 255);
    const T: Colour = Colour::TRANSPARENT;

    fn grid_from(art: &[&str]) -> PixelGrid {
        let rows: Vec<Vec<Colour>> = art
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        'r' => RED,
                        'b' => BLUE,
                        _ => T,
                    })
                    .collect()
            })
            .collect();
        PixelGrid::from_rows(&rows)
    }

    #[test]
    fn test_empty_grid_has_no_masks() {
        let grid = PixelGrid::filled(50, 50, T);
        assert!(ShapeSegmenter::default().segment(&grid).is_empty());
    }

    #[test]
    fn test_single_component_ignores_colour() {
        let grid = grid_from(&["rrbb", "rrbb"]);
        let masks = ShapeSegmenter::default().segment(&grid);

        assert_eq!(masks.len(), 1);
        assert_eq!(masks[0].len(), 8);
    }

    #[test]
    fn test_diagonal_pixels_are_not_connected() {
        let grid = grid_from(&["rr..", "rr..", "..bb", "..bb"]);
        let masks = ShapeSegmenter::default().segment(&grid);

        assert_eq!(masks.len(), 2);
        assert_eq!(masks[0].index(), 0);
        assert_eq!(masks[1].index(), 1);
        assert!(masks[0].contains(Point::new(0, 0)));
        assert!(masks[1].contains(Point::new(3, 3)));
    }

    #[test]
    fn test_noise_components_dropped() {
        let grid = grid_from(&["r....", ".....", "..rrr", "..rr."]);
        let masks = ShapeSegmenter::new(4).segment(&grid);

        assert_eq!(masks.len(), 1);
        assert_eq!(masks[0].len(), 5);
        assert_eq!(masks[0].index(), 0);
    }

    #[test]
    fn test_threshold_of_one_keeps_singletons() {
        let grid = grid_from(&["r.r"]);
        assert_eq!(ShapeSegmenter::new(1).segment(&grid).len(), 2);
    }

    #[test]
    fn test_masks_cover_opaque_pixels_disjointly() {
        let grid = grid_from(&[
            "rrr..bb", //
            "r.r..bb",
            "rrr....",
            ".....r.",
            "bbbbbb.",
        ]);
        let masks = ShapeSegmenter::new(4).segment(&grid);

        let mut seen = HashSet::new();
        for mask in &masks {
            for p in mask.pixels() {
                assert!(seen.insert(*p), "pixel {:?} in two masks", p);
                assert!(grid.is_opaque_at(p.x as usize, p.y as usize));
            }
        }

        // Every opaque pixel belongs to a component of at least 4 pixels here.
        assert_eq!(seen.len(), grid.opaque_count());
    }

    #[test]
    fn test_mask_pixels_row_major() {
        let grid = grid_from(&[".r", "rr"]);
        let masks = ShapeSegmenter::new(1).segment(&grid);

        assert_eq!(
            masks[0].pixels(),
            &[Point::new(1, 0), Point::new(0, 1), Point::new(1, 1)]
        );
    }

    #[test]
    fn test_segmentation_is_deterministic() {
        let grid = grid_from(&["rr.bb", "rr.bb", ".....", "rrrr."]);
        let segmenter = ShapeSegmenter::new(2);

        assert_eq!(segmenter.segment(&grid), segmenter.segment(&grid));
    }
}
