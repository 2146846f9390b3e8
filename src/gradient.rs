//! Fill estimation for a region: solid colour or two-stop linear gradient.
//!
//! The direction comes from averaged Sobel responses over the region's
//! intensity field. This is a heuristic: radial or multi-directional colour
//! fields are reported as linear, and flat regions with noise may come back
//! as gradients. `mean_edge_response` is the only place the direction is
//! measured.

use std::collections::HashSet;

use tracing::trace;

use crate::segment::Region;
use crate::types::{Colour, FillResult, GradientSpec, LinearGradient, PixelGrid, Point};

/// Default mean edge response below which a region counts as directionless.
pub const DEFAULT_FLAT_THRESHOLD: f32 = 1e-4;

/// Decides between solid and linear fills.
#[derive(Debug, Clone, Copy)]
pub struct GradientEstimator {
    flat_threshold: f32,
}

impl Default for GradientEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_FLAT_THRESHOLD)
    }
}

impl GradientEstimator {
    pub fn new(flat_threshold: f32) -> Self {
        Self {
            flat_threshold: flat_threshold.max(0.0),
        }
    }

    /// Estimate the colour field of a region.
    ///
    /// Regions with a single RGB colour, or whose mean edge response is
    /// at or below the flat threshold, get a solid fill of their mean colour.
    pub fn estimate<R: Region + ?Sized>(&self, grid: &PixelGrid, region: &R) -> GradientSpec {
        let colours = region_colours(grid, region);
        let mean = Colour::mean(colours.iter().copied()).unwrap_or(Colour::TRANSPARENT);

        let distinct: HashSet<[u8; 3]> = colours.iter().map(|c| c.to_rgb()).collect();
        if distinct.len() < 2 {
            return GradientSpec::Solid(mean);
        }

        let (gx, gy) = mean_edge_response(grid, region);
        if gx.hypot(gy) <= self.flat_threshold {
            trace!(index = region.index(), "no dominant direction, using solid fill");
            return GradientSpec::Solid(mean);
        }

        let (dx, dy) = canonical_direction(gx, gy);
        let angle = dy.atan2(dx);
        let (start, end) = projection_extremes(region.pixels(), &colours, angle);

        trace!(index = region.index(), angle, %start, %end, "linear gradient");
        GradientSpec::Linear(LinearGradient { start, end, angle })
    }

    /// Full fill for a region: gradient estimate (when enabled) plus opacity.
    pub fn fill<R: Region + ?Sized>(
        &self,
        grid: &PixelGrid,
        region: &R,
        gradients: bool,
    ) -> FillResult {
        if gradients {
            FillResult::new(self.estimate(grid, region), mean_opacity(grid, region))
        } else {
            solid_fill(grid, region)
        }
    }
}

/// Solid fill of a region's mean colour with its mean opacity.
pub fn solid_fill<R: Region + ?Sized>(grid: &PixelGrid, region: &R) -> FillResult {
    let mean = Colour::mean(region_colours(grid, region)).unwrap_or(Colour::TRANSPARENT);
    FillResult::solid(mean, mean_opacity(grid, region))
}

/// Mean alpha of the region normalised to `[0, 1]`.
pub fn mean_opacity<R: Region + ?Sized>(grid: &PixelGrid, region: &R) -> f32 {
    let pixels = region.pixels();
    if pixels.is_empty() {
        return 0.0;
    }
    let total: f32 = pixels.iter().map(|&p| colour_at(grid, p).opacity()).sum();
    total / pixels.len() as f32
}

/// Mean horizontal and vertical Sobel response of the region's intensity.
///
/// Neighbours outside the region take the centre pixel's intensity, so the
/// region's own silhouette does not register as an edge.
pub fn mean_edge_response<R: Region + ?Sized>(grid: &PixelGrid, region: &R) -> (f32, f32) {
    let pixels = region.pixels();
    if pixels.is_empty() {
        return (0.0, 0.0);
    }

    let (mut sum_x, mut sum_y) = (0.0f32, 0.0f32);
    for &p in pixels {
        let centre = colour_at(grid, p).intensity();
        let sample = |dx: i32, dy: i32| {
            let q = Point::new(p.x + dx, p.y + dy);
            if region.contains(q) {
                colour_at(grid, q).intensity()
            } else {
                centre
            }
        };

        let (p00, p10, p20) = (sample(-1, -1), sample(0, -1), sample(1, -1));
        let (p01, p21) = (sample(-1, 0), sample(1, 0));
        let (p02, p12, p22) = (sample(-1, 1), sample(0, 1), sample(1, 1));

        sum_x += -p00 + p20 - 2.0 * p01 + 2.0 * p21 - p02 + p22;
        sum_y += -p00 - 2.0 * p10 - p20 + p02 + 2.0 * p12 + p22;
    }

    let n = pixels.len() as f32;
    (sum_x / n, sum_y / n)
}

/// Fold a direction into the half-plane whose angle lies in `(-pi/2, pi/2]`.
///
/// A direction and its opposite describe the same gradient axis; flipping it
/// also swaps which end supplies the start colour. Components that are tiny
/// relative to the magnitude are snapped to zero first so near-vertical and
/// near-horizontal responses fold consistently.
fn canonical_direction(gx: f32, gy: f32) -> (f32, f32) {
    let magnitude = gx.hypot(gy);
    let snap = |v: f32| if v.abs() <= magnitude * 1e-4 { 0.0 } else { v };
    let (gx, gy) = (snap(gx), snap(gy));

    if gx < 0.0 || (gx == 0.0 && gy < 0.0) {
        (-gx, -gy)
    } else {
        (gx, gy)
    }
}

/// Colours at the minimal and maximal projection onto the direction.
///
/// Ties go to the earliest pixel in row-major order.
fn projection_extremes(pixels: &[Point], colours: &[Colour], angle: f32) -> (Colour, Colour) {
    let n = pixels.len() as f32;
    let cx = pixels.iter().map(|p| p.x as f32).sum::<f32>() / n;
    let cy = pixels.iter().map(|p| p.y as f32).sum::<f32>() / n;
    let (dx, dy) = (angle.cos(), angle.sin());

    let mut min = (f32::INFINITY, Colour::TRANSPARENT);
    let mut max = (f32::NEG_INFINITY, Colour::TRANSPARENT);
    for (p, &colour) in pixels.iter().zip(colours) {
        let t = (p.x as f32 - cx) * dx + (p.y as f32 - cy) * dy;
        if t < min.0 {
            min = (t, colour);
        }
        if t > max.0 {
            max = (t, colour);
        }
    }

    (min.1, max.1)
}

fn colour_at(grid: &PixelGrid, p: Point) -> Colour {
    grid.get_signed(p.x as i64, p.y as i64)
        .unwrap_or(Colour::TRANSPARENT)
}

fn region_colours<R: Region + ?Sized>(grid: &PixelGrid, region: &R) -> Vec<Colour> {
    region.pixels().iter().map(|&p| colour_at(grid, p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::ShapeSegmenter;
    use std::f32::consts::FRAC_PI_2;

    const A: Colour = Colour::rgb(255, 0, 0);
    const B: Colour = Colour::rgb(0, 0, 255);

    fn lerp(a: Colour, b: Colour, t: f32) -> Colour {
        let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
        Colour::rgb(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
    }

    fn horizontal_ramp(width: usize, height: usize, a: Colour, b: Colour) -> PixelGrid {
        let row: Vec<Colour> = (0..width)
            .map(|x| lerp(a, b, x as f32 / (width - 1) as f32))
            .collect();
        PixelGrid::from_rows(&vec![row; height])
    }

    fn estimate_first(grid: &PixelGrid) -> GradientSpec {
        let masks = ShapeSegmenter::new(1).segment(grid);
        GradientEstimator::default().estimate(grid, &masks[0])
    }

    #[test]
    fn test_uniform_region_is_solid() {
        let grid = PixelGrid::filled(6, 4, A);
        assert_eq!(estimate_first(&grid), GradientSpec::Solid(A));
    }

    #[test]
    fn test_horizontal_ramp_dark_to_light() {
        let grid = horizontal_ramp(20, 1, Colour::rgb(0, 0, 0), Colour::rgb(255, 255, 255));
        let GradientSpec::Linear(g) = estimate_first(&grid) else {
            panic!("expected linear gradient");
        };

        assert!(g.angle.abs() < 1e-3);
        assert_eq!(g.start, Colour::rgb(0, 0, 0));
        assert_eq!(g.end, Colour::rgb(255, 255, 255));
    }

    #[test]
    fn test_horizontal_ramp_light_to_dark_keeps_left_start() {
        // Red is brighter than blue, so the raw response points left.
        let grid = horizontal_ramp(20, 3, A, B);
        let GradientSpec::Linear(g) = estimate_first(&grid) else {
            panic!("expected linear gradient");
        };

        assert!(g.angle.abs() < 1e-3);
        assert_eq!(g.start, A);
        assert_eq!(g.end, B);
    }

    #[test]
    fn test_vertical_ramp() {
        let rows: Vec<Vec<Colour>> = (0..10)
            .map(|y| {
                let c = lerp(Colour::rgb(0, 0, 0), Colour::rgb(200, 200, 200), y as f32 / 9.0);
                vec![c; 4]
            })
            .collect();
        let grid = PixelGrid::from_rows(&rows);
        let GradientSpec::Linear(g) = estimate_first(&grid) else {
            panic!("expected linear gradient");
        };

        assert!((g.angle - FRAC_PI_2).abs() < 1e-3);
        assert_eq!(g.start, Colour::rgb(0, 0, 0));
        assert_eq!(g.end, Colour::rgb(200, 200, 200));
    }

    #[test]
    fn test_symmetric_region_falls_back_to_solid() {
        let black = Colour::rgb(0, 0, 0);
        let white = Colour::rgb(255, 255, 255);
        let grid = PixelGrid::from_rows(&[vec![black, white, black]]);

        assert_eq!(
            estimate_first(&grid),
            GradientSpec::Solid(Colour::rgb(85, 85, 85))
        );
    }

    #[test]
    fn test_alpha_only_variation_is_solid() {
        let grid = PixelGrid::from_rows(&[vec![
            Colour::new(10, 20, 30, 255),
            Colour::new(10, 20, 30, 51),
        ]]);
        let masks = ShapeSegmenter::new(1).segment(&grid);
        let fill = GradientEstimator::default().fill(&grid, &masks[0], true);

        assert!(matches!(fill.paint, GradientSpec::Solid(_)));
        assert!((fill.opacity - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_fill_without_gradients_uses_mean_colour() {
        let grid = horizontal_ramp(10, 2, Colour::rgb(0, 0, 0), Colour::rgb(200, 0, 0));
        let masks = ShapeSegmenter::new(1).segment(&grid);
        let fill = GradientEstimator::default().fill(&grid, &masks[0], false);

        assert_eq!(fill.paint, GradientSpec::Solid(Colour::rgb(100, 0, 0)));
        assert_eq!(fill.opacity, 1.0);
    }

    #[test]
    fn test_canonical_direction() {
        assert_eq!(canonical_direction(-1.0, 0.0), (1.0, 0.0));
        assert_eq!(canonical_direction(0.0, -2.0), (0.0, 2.0));
        assert_eq!(canonical_direction(1.0, -1.0), (1.0, -1.0));
        assert_eq!(canonical_direction(-1e-9, 1.0), (0.0, 1.0));

        let (dx, dy) = canonical_direction(-3.0, 4.0);
        let angle = dy.atan2(dx);
        assert!(angle > -FRAC_PI_2 && angle <= FRAC_PI_2);
    }

    #[test]
    fn test_edge_response_ignores_silhouette() {
        let grid = PixelGrid::filled(5, 5, A);
        let masks = ShapeSegmenter::new(1).segment(&grid);
        let (gx, gy) = mean_edge_response(&grid, &masks[0]);

        assert!(gx.abs() < 1e-6 && gy.abs() < 1e-6);
    }
}
