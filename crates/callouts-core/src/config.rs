//! Optional TOML configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::{Extent, LayoutParams, LinkOrdering, NodeOrdering};
use crate::palette::PartyPalette;

/// Default config file name looked up next to the dataset.
pub const CONFIG_FILE: &str = "callouts.toml";

/// Visual layout settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_thickness: f64,
    pub node_padding: f64,
    pub extent: Extent,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            node_thickness: 15.0,
            node_padding: 10.0,
            extent: Extent {
                x0: 170.0,
                y0: 30.0,
                x1: 1200.0,
                y1: 780.0,
            },
        }
    }
}

impl LayoutConfig {
    /// Layout parameters with the fixed ordering rules: nodes keep their
    /// involvement order, larger links stack first.
    pub fn params(&self) -> LayoutParams {
        LayoutParams {
            node_thickness: self.node_thickness,
            node_padding: self.node_padding,
            extent: self.extent,
            node_ordering: NodeOrdering::None,
            link_ordering: LinkOrdering::DescendingByValue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub palette: PartyPalette,
}

impl Config {
    /// Load from `path`, or defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if layout.extent.width() <= 0.0 || layout.extent.height() <= 0.0 {
            return Err(Error::Config(
                "layout.extent must span a positive width and height".to_string(),
            ));
        }
        if layout.node_thickness <= 0.0 {
            return Err(Error::Config("layout.node_thickness must be positive".to_string()));
        }
        if layout.node_padding < 0.0 {
            return Err(Error::Config("layout.node_padding must not be negative".to_string()));
        }
        Ok(())
    }
}
