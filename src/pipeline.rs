//! Raster-to-vector conversion.
//!
//! Each call owns its own accumulator: the grid is borrowed read-only and the
//! finished `OutputDocument` is returned.

use std::time::Instant;

use tracing::{debug, info};

use crate::config::{Config, GroupingMode};
use crate::contour::extract_contour;
use crate::document::{DocumentAssembler, OutputDocument};
use crate::gradient::GradientEstimator;
use crate::segment::{ProximityClusterer, Region, ShapeSegmenter};
use crate::types::{PixelGrid, Point};

/// Convert a pixel grid into a vector document.
///
/// Never fails on a well-formed grid: degenerate regions are skipped and
/// ambiguous gradients fall back to solid fills.
pub fn convert(grid: &PixelGrid, config: &Config) -> OutputDocument {
    let started = Instant::now();
    let mut assembler = DocumentAssembler::new(grid.width(), grid.height());

    if grid.opaque_count() == 0 {
        debug!(width = grid.width(), height = grid.height(), "no opaque pixels");
        return assembler.finalize();
    }

    let estimator = GradientEstimator::new(config.gradient.flat_threshold);

    match config.grouping {
        GroupingMode::Color => {
            let masks = ShapeSegmenter::new(config.min_shape_pixels).segment(grid);
            emit_regions(&mut assembler, grid, &masks, &estimator, config.gradients);
        }
        GroupingMode::Proximity => {
            let clusters =
                ProximityClusterer::new(config.proximity.eps, config.proximity.min_points)
                    .cluster(grid);
            emit_regions(&mut assembler, grid, &clusters, &estimator, config.gradients);
        }
        GroupingMode::Ungrouped => {
            for (x, y, colour) in grid.opaque_pixels() {
                assembler.push_cell(Point::new(x as i32, y as i32), colour);
            }
        }
    }

    let doc = assembler.finalize();
    info!(
        grouping = config.grouping.name(),
        elements = doc.elements().len(),
        gradients = doc.gradients().len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "converted raster"
    );
    doc
}

/// Contour and fill each region in sequence order.
fn emit_regions<R: Region>(
    assembler: &mut DocumentAssembler,
    grid: &PixelGrid,
    regions: &[R],
    estimator: &GradientEstimator,
    gradients: bool,
) {
    let mut skipped = 0usize;

    for region in regions {
        let Some(polygon) = extract_contour(region) else {
            skipped += 1;
            continue;
        };

        let fill = estimator.fill(grid, region, gradients);
        assembler.push_shape(region.index(), polygon, fill);
    }

    debug!(regions = regions.len(), skipped, "emitted regions");
}
