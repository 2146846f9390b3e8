//! In-memory RGBA raster.
//!
//! The grid is immutable once built and is only ever borrowed by the
//! conversion pipeline.

use std::path::Path;

use image::RgbaImage;

use crate::error::{Result, RvError};

use super::Colour;

/// A row-major RGBA pixel grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Colour>,
}

impl PixelGrid {
    /// Build a grid from a flat `[r, g, b, a, r, g, b, a, ...]` buffer.
    pub fn from_rgba(width: usize, height: usize, samples: &[u8]) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| RvError::Grid {
                message: format!("{}x{} is too large", width, height),
            })?;

        if samples.len() != expected {
            return Err(RvError::Grid {
                message: format!(
                    "expected {} samples for {}x{}, got {}",
                    expected,
                    width,
                    height,
                    samples.len()
                ),
            });
        }

        let pixels = samples
            .chunks_exact(4)
            .map(|px| Colour::new(px[0], px[1], px[2], px[3]))
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a grid from rows of colours (`rows[y][x]`).
    ///
    /// Short rows are padded with transparent pixels.
    pub fn from_rows(rows: &[Vec<Colour>]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut pixels = vec![Colour::TRANSPARENT; width * height];
        for (y, row) in rows.iter().enumerate() {
            pixels[y * width..y * width + row.len()].copy_from_slice(row);
        }

        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build a grid from a decoded image.
    pub fn from_image(img: &RgbaImage) -> Self {
        let pixels = img.pixels().map(|p| Colour::from_rgba(p.0)).collect();

        Self {
            width: img.width() as usize,
            height: img.height() as usize,
            pixels,
        }
    }

    /// A grid filled with a single colour.
    pub fn filled(width: usize, height: usize, colour: Colour) -> Self {
        Self {
            width,
            height,
            pixels: vec![colour; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check for a zero-sized grid.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Get a pixel at the given position.
    pub fn get(&self, x: usize, y: usize) -> Option<Colour> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Get a pixel at a signed position, `None` outside the grid.
    pub fn get_signed(&self, x: i64, y: i64) -> Option<Colour> {
        if x < 0 || y < 0 {
            return None;
        }
        self.get(x as usize, y as usize)
    }

    /// Check whether the pixel at the given position has non-zero alpha.
    pub fn is_opaque_at(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(|c| !c.is_transparent())
    }

    /// Iterate over `(x, y, colour)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Colour)> + '_ {
        let width = self.width.max(1);
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, &c)| (i % width, i / width, c))
    }

    /// Iterate over pixels with alpha > 0 in row-major order.
    pub fn opaque_pixels(&self) -> impl Iterator<Item = (usize, usize, Colour)> + '_ {
        self.iter().filter(|(_, _, c)| !c.is_transparent())
    }

    /// Number of pixels with alpha > 0.
    pub fn opaque_count(&self) -> usize {
        self.pixels.iter().filter(|c| !c.is_transparent()).count()
    }
}

/// Load an image file from disk as a pixel grid.
pub fn load_grid(path: &Path) -> Result<PixelGrid> {
    let img = image::open(path)
        .map_err(|e| match e {
            image::ImageError::IoError(err) => RvError::Io {
                path: path.to_path_buf(),
                message: err.to_string(),
            },
            other => RvError::Decode {
                path: path.to_path_buf(),
                message: other.to_string(),
                help: Some("Input must be a raster image such as PNG".to_string()),
            },
        })?
        .to_rgba8();

    Ok(PixelGrid::from_image(&img))
}
