//! Init command implementation.
//!
//! Writes a `rastervec.yaml` holding the default settings.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{Config, CONFIG_FILENAME};
use crate::error::{Result, RvError};
use crate::output::{display_path, Printer};

/// Write a default rastervec.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing rastervec.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(RvError::Output {
            path: config_path,
            message: "file already exists".to_string(),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let yaml = Config::default().to_yaml()?;
    fs::write(&config_path, yaml).map_err(|e| RvError::Io {
        path: config_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.status("Created", &display_path(&config_path));
    Ok(())
}
