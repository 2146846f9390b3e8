//! Counts describing a finished document.

use serde::Serialize;

use super::{ElementShape, OutputDocument};

/// Element and definition counts of an `OutputDocument`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub width: usize,
    pub height: usize,
    pub polygons: usize,
    pub cells: usize,
    pub gradients: usize,
}

impl DocumentSummary {
    pub fn of(doc: &OutputDocument) -> Self {
        let cells = doc
            .elements()
            .iter()
            .filter(|e| matches!(e.shape, ElementShape::Cell(_)))
            .count();

        Self {
            width: doc.width(),
            height: doc.height(),
            polygons: doc.elements().len() - cells,
            cells,
            gradients: doc.gradients().len(),
        }
    }

    pub fn elements(&self) -> usize {
        self.polygons + self.cells
    }
}
