//! Output document model, assembly and SVG serialisation.

mod assembler;
mod summary;
mod writer;

pub use assembler::{
    gradient_id, DocumentAssembler, Element, ElementShape, FillRef, GradientDef, OutputDocument,
};
pub use summary::DocumentSummary;
pub use writer::{to_svg, write_svg};
