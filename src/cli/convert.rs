//! Convert command implementation.
//!
//! Loads an image, vectorises it and writes an SVG file.

use std::path::PathBuf;

use clap::Args;

use crate::document::{write_svg, DocumentSummary};
use crate::error::{Result, RvError};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::convert;
use crate::types::load_grid;

use super::PipelineArgs;

/// Convert an image into an SVG document
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input image (PNG or any format the decoder supports)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output SVG file (default: input with .svg extension)
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

impl ConvertArgs {
    /// Effective output path.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("svg"))
    }
}

pub fn run(args: ConvertArgs, printer: &Printer) -> Result<()> {
    let output = args.output_path();
    if output == args.input {
        return Err(RvError::Output {
            path: output,
            message: "output would overwrite the input image".to_string(),
            help: Some("Pass an OUTPUT path with a different name".to_string()),
        });
    }

    let (config, source) = args.pipeline.resolve_config()?;
    if let Some(source) = &source {
        printer.info("Config", &display_path(source));
    }

    let grid = load_grid(&args.input)?;
    printer.status(
        "Converting",
        &format!(
            "{} ({}x{}, {} grouping)",
            display_path(&args.input),
            grid.width(),
            grid.height(),
            config.grouping.name()
        ),
    );

    let doc = convert(&grid, &config);
    let summary = DocumentSummary::of(&doc);
    if doc.is_empty() {
        printer.warning("Empty", "no shapes survived; writing an empty document");
    }

    write_svg(&doc, &output)?;
    printer.status(
        "Wrote",
        &format!(
            "{} ({}, {})",
            display_path(&output),
            plural(summary.elements(), "element", "elements"),
            plural(summary.gradients, "gradient", "gradients")
        ),
    );

    Ok(())
}
