//! Integer geometry primitives.

/// A point on the integer lattice.
///
/// Used both for pixel coordinates and for polygon vertices, which sit on
/// pixel corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The four corners of the unit pixel cell at this position.
    pub fn cell_corners(self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.x + 1, self.y),
            Point::new(self.x, self.y + 1),
            Point::new(self.x + 1, self.y + 1),
        ]
    }

    /// Order points row-major: by `y`, then `x`.
    pub fn scan_order(a: &Point, b: &Point) -> std::cmp::Ordering {
        (a.y, a.x).cmp(&(b.y, b.x))
    }
}

/// Twice the signed area enclosed by a vertex ring (shoelace formula).
///
/// Positive when the ring runs clockwise on a y-down raster.
pub(crate) fn shoelace(vertices: &[Point]) -> i64 {
    let n = vertices.len();
    (0..n)
        .map(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
        })
        .sum()
}

/// A closed polygon with at least three vertices.
///
/// The closing edge from the last vertex back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Create a polygon, rejecting degenerate vertex lists.
    pub fn new(vertices: Vec<Point>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        Some(Self { vertices })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Twice the signed area.
    pub fn doubled_area(&self) -> i64 {
        shoelace(&self.vertices)
    }
}
