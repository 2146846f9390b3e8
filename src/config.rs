//! Conversion configuration (rastervec.yaml).
//!
//! The config file holds the pipeline defaults; command-line flags override
//! individual fields.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RvError};
use crate::gradient::DEFAULT_FLAT_THRESHOLD;
use crate::segment::{DEFAULT_EPS, DEFAULT_MIN_POINTS, DEFAULT_MIN_SHAPE_PIXELS};

/// Config filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "rastervec.yaml";

/// How opaque pixels are grouped into shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GroupingMode {
    /// 4-connected opaque regions
    #[default]
    Color,
    /// Density clusters of nearby pixels
    Proximity,
    /// One unit cell per opaque pixel
    #[serde(rename = "none")]
    #[value(name = "none")]
    Ungrouped,
}

impl GroupingMode {
    /// Name as written in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Proximity => "proximity",
            Self::Ungrouped => "none",
        }
    }
}

/// Proximity clustering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    /// Neighbourhood radius in pixels.
    pub eps: f32,

    /// Other points within `eps` needed for a core point.
    pub min_points: usize,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            min_points: DEFAULT_MIN_POINTS,
        }
    }
}

/// Gradient detection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientConfig {
    /// Mean edge response below which a region gets a solid fill.
    pub flat_threshold: f32,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            flat_threshold: DEFAULT_FLAT_THRESHOLD,
        }
    }
}

/// Conversion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grouping: GroupingMode,

    /// Detect linear gradients inside shapes.
    pub gradients: bool,

    /// Connected regions smaller than this are dropped as noise.
    pub min_shape_pixels: usize,

    pub proximity: ProximityConfig,

    pub gradient: GradientConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grouping: GroupingMode::default(),
            gradients: false,
            min_shape_pixels: DEFAULT_MIN_SHAPE_PIXELS,
            proximity: ProximityConfig::default(),
            gradient: GradientConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RvError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(content).map_err(|e| RvError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config to use: an explicit path, else `rastervec.yaml`
    /// in `dir` if present, else defaults.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Ok((Self::load(&candidate)?, Some(candidate)));
        }

        Ok((Self::default(), None))
    }

    /// Serialise to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| RvError::Serialize {
            what: "config".to_string(),
            message: e.to_string(),
            help: None,
        })
    }

    fn validate(&self) -> Result<()> {
        if !self.proximity.eps.is_finite() || self.proximity.eps <= 0.0 {
            return Err(RvError::Config {
                message: format!("proximity.eps must be positive, got {}", self.proximity.eps),
                help: Some("The default radius is 5 pixels".to_string()),
            });
        }

        if !self.gradient.flat_threshold.is_finite() || self.gradient.flat_threshold < 0.0 {
            return Err(RvError::Config {
                message: format!(
                    "gradient.flat_threshold must be non-negative, got {}",
                    self.gradient.flat_threshold
                ),
                help: None,
            });
        }

        Ok(())
    }
}
