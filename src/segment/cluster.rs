//! Density-based clustering of opaque pixels.
//!
//! A point is a core point when at least `min_points` other opaque points lie
//! within `eps` of it. Clusters grow by chaining core points; non-core points
//! within `eps` of a core point join as border points, and every other point
//! is noise. A border point reachable from two clusters joins whichever
//! cluster reaches it first in scan order.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::types::{Colour, PixelGrid, Point};

use super::{PixelSet, Region};

/// Default neighbourhood radius in pixels.
pub const DEFAULT_EPS: f32 = 5.0;

/// Default number of other points required for a core point.
pub const DEFAULT_MIN_POINTS: usize = 3;

/// A density-connected group of opaque pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    index: usize,
    pixels: PixelSet,
    /// Source colours, aligned with `pixels`.
    colours: Vec<Colour>,
}

impl Cluster {
    /// Source colours of the member pixels (a multiset, row-major).
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    /// Channel-wise mean of the member colours.
    pub fn mean_colour(&self) -> Colour {
        Colour::mean(self.colours.iter().copied()).unwrap_or(Colour::TRANSPARENT)
    }
}

impl Region for Cluster {
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Unvisited,
    Noise,
    Member(usize),
}

/// Clusters opaque pixels by spatial density, ignoring colour.
#[derive(Debug, Clone, Copy)]
pub struct ProximityClusterer {
    eps: f32,
    min_points: usize,
}

impl Default for ProximityClusterer {
    fn default() -> Self {
        Self::new(DEFAULT_EPS, DEFAULT_MIN_POINTS)
    }
}

impl ProximityClusterer {
    pub fn new(eps: f32, min_points: usize) -> Self {
        Self {
            eps: eps.max(0.0),
            min_points,
        }
    }

    /// Cluster the opaque pixels of a grid.
    ///
    /// Clusters are numbered in the order their first core point is met in
    /// row-major scan order. Noise points are excluded.
    pub fn cluster(&self, grid: &PixelGrid) -> Vec<Cluster> {
        let samples: Vec<(Point, Colour)> = grid
            .opaque_pixels()
            .map(|(x, y, c)| (Point::new(x as i32, y as i32), c))
            .collect();

        if samples.is_empty() {
            debug!("no opaque pixels to cluster");
            return Vec::new();
        }

        let points: Vec<Point> = samples.iter().map(|(p, _)| *p).collect();
        let index = SpatialIndex::new(&points, self.eps);
        let labels = self.label(&index);

        let count = labels
            .iter()
            .filter_map(|l| match l {
                Label::Member(id) => Some(id + 1),
                _ => None,
            })
            .max()
            .unwrap_or(0);

        let mut members: Vec<Vec<(Point, Colour)>> = vec![Vec::new(); count];
        let mut noise = 0usize;
        for (sample, label) in samples.iter().zip(&labels) {
            match label {
                Label::Member(id) => members[*id].push(*sample),
                _ => noise += 1,
            }
        }

        let clusters: Vec<Cluster> = members
            .into_iter()
            .enumerate()
            .map(|(index, group)| {
                // Samples were collected row-major, so points and colours stay aligned.
                let (points, colours): (Vec<Point>, Vec<Colour>) = group.into_iter().unzip();
                Cluster {
                    index,
                    pixels: PixelSet::new(points),
                    colours,
                }
            })
            .collect();

        debug!(
            clusters = clusters.len(),
            noise,
            eps = self.eps,
            min_points = self.min_points,
            "clustered opaque pixels"
        );
        clusters
    }

    fn label(&self, index: &SpatialIndex) -> Vec<Label> {
        let n = index.len();
        let mut labels = vec![Label::Unvisited; n];
        let mut next_id = 0;

        for i in 0..n {
            if labels[i] != Label::Unvisited {
                continue;
            }

            let neighbours = index.neighbours(i);
            if neighbours.len() < self.min_points {
                labels[i] = Label::Noise;
                continue;
            }

            let id = next_id;
            next_id += 1;
            labels[i] = Label::Member(id);

            let mut queue: VecDeque<usize> = neighbours.into();
            while let Some(j) = queue.pop_front() {
                let label = labels[j];
                match label {
                    Label::Member(_) => {}
                    Label::Noise => labels[j] = Label::Member(id),
                    Label::Unvisited => {
                        labels[j] = Label::Member(id);
                        let reach = index.neighbours(j);
                        if reach.len() >= self.min_points {
                            queue.extend(
                                reach
                                    .into_iter()
                                    .filter(|&k| !matches!(labels[k], Label::Member(_))),
                            );
                        }
                    }
                }
            }
        }

        labels
    }
}

/// Uniform grid bucketing for radius queries.
struct SpatialIndex<'a> {
    points: &'a [Point],
    cell: i32,
    eps_sq: f64,
    buckets: HashMap<(i32, i32), Vec<usize>>,
}

impl<'a> SpatialIndex<'a> {
    fn new(points: &'a [Point], eps: f32) -> Self {
        let cell = (eps.ceil() as i32).max(1);
        let mut buckets: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
        for (i, p) in points.iter().enumerate() {
            buckets
                .entry((p.x.div_euclid(cell), p.y.div_euclid(cell)))
                .or_default()
                .push(i);
        }

        Self {
            points,
            cell,
            eps_sq: (eps as f64) * (eps as f64),
            buckets,
        }
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    /// Indices of the other points within `eps` of point `i`, ascending.
    fn neighbours(&self, i: usize) -> Vec<usize> {
        let p = self.points[i];
        let (cx, cy) = (p.x.div_euclid(self.cell), p.y.div_euclid(self.cell));
        let mut found = Vec::new();

        for by in cy - 1..=cy + 1 {
            for bx in cx - 1..=cx + 1 {
                let Some(bucket) = self.buckets.get(&(bx, by)) else {
                    continue;
                };
                for &j in bucket {
                    if j == i {
                        continue;
                    }
                    let q = self.points[j];
                    let dx = (q.x - p.x) as f64;
                    let dy = (q.y - p.y) as f64;
                    if dx * dx + dy * dy <= self.eps_sq {
                        found.push(j);
                    }
                }
            }
        }

        found.sort_unstable();
        found
    }
}
