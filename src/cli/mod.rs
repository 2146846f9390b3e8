pub mod completions;
pub mod convert;
pub mod init;
pub mod inspect;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{Config, GroupingMode};
use crate::error::Result;

/// rastervec - Raster to vector converter
#[derive(Parser, Debug)]
#[command(name = "rastervec")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an image into an SVG document
    Convert(convert::ConvertArgs),

    /// Run the conversion and report what it would produce
    Inspect(inspect::InspectArgs),

    /// Write a default rastervec.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Pipeline options shared by commands that run a conversion.
#[derive(Args, Debug, Default, Clone)]
pub struct PipelineArgs {
    /// Grouping method (overrides the config file)
    #[arg(long, value_enum)]
    pub grouping: Option<GroupingMode>,

    /// Enable gradient detection
    #[arg(long)]
    pub gradients: bool,

    /// Config file (default: ./rastervec.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl PipelineArgs {
    /// Load the config and apply command-line overrides.
    pub fn resolve_config(&self) -> Result<(Config, Option<PathBuf>)> {
        let cwd = std::env::current_dir()?;
        let (config, source) = Config::resolve(self.config.as_deref(), &cwd)?;
        Ok((self.apply(config), source))
    }

    fn apply(&self, mut config: Config) -> Config {
        if let Some(grouping) = self.grouping {
            config.grouping = grouping;
        }
        if self.gradients {
            config.gradients = true;
        }
        config
    }
}
