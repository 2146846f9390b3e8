//! Inspect command implementation.
//!
//! Runs the conversion without writing and reports element counts.

use std::path::PathBuf;

use clap::Args;

use crate::document::DocumentSummary;
use crate::error::{Result, RvError};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::convert;
use crate::types::load_grid;

use super::PipelineArgs;

/// Run the conversion and report what it would produce
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input image
    #[arg(required = true)]
    pub input: PathBuf,

    /// Print the summary as JSON on stdout
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

pub fn run(args: InspectArgs, printer: &Printer) -> Result<()> {
    let (config, _) = args.pipeline.resolve_config()?;
    let grid = load_grid(&args.input)?;
    let summary = DocumentSummary::of(&convert(&grid, &config));

    if args.json {
        println!("{}", summary_json(&summary)?);
        return Ok(());
    }

    printer.info(
        "Inspected",
        &format!(
            "{} ({}x{}, {} opaque)",
            display_path(&args.input),
            grid.width(),
            grid.height(),
            plural(grid.opaque_count(), "pixel", "pixels")
        ),
    );
    printer.info(
        "Summary",
        &format!(
            "{}, {}, {}",
            plural(summary.polygons, "polygon", "polygons"),
            plural(summary.cells, "cell", "cells"),
            plural(summary.gradients, "gradient", "gradients")
        ),
    );

    Ok(())
}

/// Pretty-printed JSON form of a summary, as written by `--json`.
pub fn summary_json(summary: &DocumentSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).map_err(|e| RvError::Serialize {
        what: "summary".to_string(),
        message: e.to_string(),
        help: None,
    })
}
