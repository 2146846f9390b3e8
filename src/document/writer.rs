//! SVG output for finished documents.

use std::path::Path;

use svg::node::element::path::Data;
use svg::node::element::{Definitions, LinearGradient, Path as SvgPath, Rectangle, Stop};
use svg::Document;

use crate::error::{Result, RvError};
use crate::types::Colour;

use super::{ElementShape, FillRef, GradientDef, OutputDocument};

/// Build the SVG tree for a document.
pub fn to_svg(doc: &OutputDocument) -> Document {
    let mut document = Document::new()
        .set("width", doc.width())
        .set("height", doc.height())
        .set("viewBox", format!("0 0 {} {}", doc.width(), doc.height()));

    if !doc.gradients().is_empty() {
        let defs = doc
            .gradients()
            .iter()
            .fold(Definitions::new(), |defs, g| defs.add(linear_gradient(g)));
        document = document.add(defs);
    }

    for element in doc.elements() {
        let fill = match &element.fill {
            FillRef::Colour(colour) => rgb(*colour),
            FillRef::Gradient(id) => format!("url(#{})", id),
        };
        let opacity = round_to(element.opacity, 1000.0);

        match &element.shape {
            ElementShape::Polygon(polygon) => {
                let vertices = polygon.vertices();
                let data = vertices[1..]
                    .iter()
                    .fold(
                        Data::new().move_to((vertices[0].x as f32, vertices[0].y as f32)),
                        |data, v| data.line_to((v.x as f32, v.y as f32)),
                    )
                    .close();

                document = document.add(
                    SvgPath::new()
                        .set("d", data)
                        .set("fill", fill)
                        .set("fill-opacity", opacity),
                );
            }
            ElementShape::Cell(at) => {
                document = document.add(
                    Rectangle::new()
                        .set("x", at.x)
                        .set("y", at.y)
                        .set("width", 1)
                        .set("height", 1)
                        .set("fill", fill)
                        .set("fill-opacity", opacity),
                );
            }
        }
    }

    document
}

/// Write a document to an SVG file.
pub fn write_svg(doc: &OutputDocument, path: &Path) -> Result<()> {
    svg::save(path, &to_svg(doc)).map_err(|e| RvError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write SVG: {}", e),
    })
}

fn linear_gradient(def: &GradientDef) -> LinearGradient {
    let [x1, y1, x2, y2] = def.endpoints();

    LinearGradient::new()
        .set("id", def.id.as_str())
        .set("x1", percent(x1))
        .set("y1", percent(y1))
        .set("x2", percent(x2))
        .set("y2", percent(y2))
        .add(
            Stop::new()
                .set("offset", "0%")
                .set("stop-color", rgb(def.start)),
        )
        .add(
            Stop::new()
                .set("offset", "100%")
                .set("stop-color", rgb(def.end)),
        )
}

fn rgb(colour: Colour) -> String {
    format!("rgb({}, {}, {})", colour.r, colour.g, colour.b)
}

fn percent(value: f32) -> String {
    format!("{}%", round_to(value, 10.0))
}

/// Round for output; `+ 0.0` turns `-0` into `0`.
fn round_to(value: f32, scale: f32) -> f32 {
    (value * scale).round() / scale + 0.0
}
