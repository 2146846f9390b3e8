//! Incremental construction of the output document.
//!
//! `DocumentAssembler` accepts elements in processing order and is consumed
//! by `finalize`, after which the resulting `OutputDocument` is read-only.

use std::collections::HashSet;

use tracing::warn;

use crate::types::{Colour, FillResult, GradientSpec, LinearGradient, Point, Polygon};

/// Gradient definition id for the region with the given sequence index.
pub fn gradient_id(index: usize) -> String {
    format!("gradient_{}", index)
}

/// What an element is filled with.
#[derive(Debug, Clone, PartialEq)]
pub enum FillRef {
    Colour(Colour),
    /// Reference to a gradient definition by id.
    Gradient(String),
}

/// Geometry of a drawable element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementShape {
    Polygon(Polygon),
    /// A single 1x1 pixel cell with its top-left corner at the point.
    Cell(Point),
}

/// One drawable element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub shape: ElementShape,
    pub fill: FillRef,
    /// In `[0, 1]`.
    pub opacity: f32,
}

/// A two-stop linear gradient definition.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientDef {
    pub id: String,
    pub start: Colour,
    pub end: Colour,
    pub angle: f32,
}

impl GradientDef {
    /// Start and end coordinates as bounding-box percentages:
    /// `[x1, y1, x2, y2]`, centred on 50% and following the angle.
    pub fn endpoints(&self) -> [f32; 4] {
        let (dx, dy) = (self.angle.cos() * 50.0, self.angle.sin() * 50.0);
        [50.0 - dx, 50.0 - dy, 50.0 + dx, 50.0 + dy]
    }
}

/// The finished vector document.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputDocument {
    width: usize,
    height: usize,
    elements: Vec<Element>,
    gradients: Vec<GradientDef>,
}

impl OutputDocument {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Elements in drawing order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Gradient definitions in allocation order.
    pub fn gradients(&self) -> &[GradientDef] {
        &self.gradients
    }

    pub fn gradient(&self, id: &str) -> Option<&GradientDef> {
        self.gradients.iter().find(|g| g.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Accumulates elements and gradient definitions.
#[derive(Debug)]
pub struct DocumentAssembler {
    doc: OutputDocument,
    gradient_ids: HashSet<String>,
}

impl DocumentAssembler {
    /// Start a document with the given canvas size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            doc: OutputDocument {
                width,
                height,
                elements: Vec::new(),
                gradients: Vec::new(),
            },
            gradient_ids: HashSet::new(),
        }
    }

    /// Append a polygon for the region with sequence index `index`.
    ///
    /// Linear fills register a `gradient_{index}` definition first.
    pub fn push_shape(&mut self, index: usize, polygon: Polygon, fill: FillResult) {
        let fill_ref = match fill.paint {
            GradientSpec::Solid(colour) => FillRef::Colour(colour),
            GradientSpec::Linear(gradient) => self.register_gradient(index, gradient),
        };

        self.doc.elements.push(Element {
            shape: ElementShape::Polygon(polygon),
            fill: fill_ref,
            opacity: fill.opacity.clamp(0.0, 1.0),
        });
    }

    /// Append a unit cell for a single pixel.
    pub fn push_cell(&mut self, at: Point, colour: Colour) {
        self.doc.elements.push(Element {
            shape: ElementShape::Cell(at),
            fill: FillRef::Colour(colour),
            opacity: colour.opacity(),
        });
    }

    pub fn len(&self) -> usize {
        self.doc.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.elements.is_empty()
    }

    /// Finish the document.
    pub fn finalize(self) -> OutputDocument {
        self.doc
    }

    fn register_gradient(&mut self, index: usize, gradient: LinearGradient) -> FillRef {
        let id = gradient_id(index);
        if !self.gradient_ids.insert(id.clone()) {
            warn!(%id, "gradient id already allocated, using solid start colour");
            return FillRef::Colour(gradient.start);
        }

        self.doc.gradients.push(GradientDef {
            id: id.clone(),
            start: gradient.start,
            end: gradient.end,
            angle: gradient.angle,
        });
        FillRef::Gradient(id)
    }
}
