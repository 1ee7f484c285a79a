//! Everything needed to reproduce a generated world.
//!
//! A [`WorldConfig`] captures grid dimensions, the noise seed, the mode and
//! an optional color map override. It can be built in code, parsed from JSON,
//! or loaded from a file; missing JSON keys fall back to the defaults.

use crate::colormap::ColorMap;
use crate::mode::Mode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use wgen_core::{WorldError, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Seed used when none is given.
pub const DEFAULT_SEED: u32 = 42;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
    pub seed: u32,
    pub mode: Mode,
    /// Overrides the mode's own color map when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_map: Option<ColorMap>,
    /// How many successive seeds to render.
    pub variants: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: DEFAULT_SEED,
            mode: Mode::default(),
            color_map: None,
            variants: 1,
        }
    }
}

impl WorldConfig {
    /// Rejects zero or overflowing dimensions and a zero variant count.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.width == 0 || self.height == 0 || self.variants == 0 {
            return Err(WorldError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .and_then(|cells| cells.checked_mul(4))
            .ok_or(WorldError::InvalidDimensions)?;
        Ok(())
    }

    /// The color map override, or the mode's own map.
    pub fn effective_color_map(&self) -> ColorMap {
        self.color_map.unwrap_or_else(|| self.mode.color_map())
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, WorldError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| WorldError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, WorldError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| WorldError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }
}
