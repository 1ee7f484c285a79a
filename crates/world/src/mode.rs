//! Preset generation modes.
//!
//! A [`Mode`] picks both the filter pipeline that fills the grid and the
//! color map used to display it. Modes cycle in a fixed order so a shell can
//! step through them with one key.

use crate::colormap::ColorMap;
use serde::{Deserialize, Serialize};
use wgen_core::{Cell, Chain, Constant, NoiseFilter, RoundIsland, SquareIsland, WorldError};

/// Names accepted by [`Mode::from_name`], in cycle order.
const MODE_NAMES: &[&str] = &["height", "round", "humidity", "all"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Raw noise height, grayscale.
    Height,
    /// The round island mask alone, grayscale.
    Round,
    /// Raw noise humidity, green.
    Humidity,
    /// Noise shaped by a doubled square island mask, biome colors.
    #[default]
    All,
}

impl Mode {
    /// Looks up a mode by name.
    ///
    /// Returns `WorldError::UnknownMode` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, WorldError> {
        match name {
            "height" => Ok(Mode::Height),
            "round" => Ok(Mode::Round),
            "humidity" => Ok(Mode::Humidity),
            "all" => Ok(Mode::All),
            _ => Err(WorldError::UnknownMode(name.to_string())),
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        MODE_NAMES
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Height => "height",
            Mode::Round => "round",
            Mode::Humidity => "humidity",
            Mode::All => "all",
        }
    }

    /// The next mode in display order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Mode::Height => Mode::Round,
            Mode::Round => Mode::Humidity,
            Mode::Humidity => Mode::All,
            Mode::All => Mode::Height,
        }
    }

    /// The color map this mode is displayed with.
    pub fn color_map(self) -> ColorMap {
        match self {
            Mode::Height | Mode::Round => ColorMap::Height,
            Mode::Humidity => ColorMap::Humidity,
            Mode::All => ColorMap::Biome,
        }
    }

    /// Builds a fresh filter chain for a `width x height` grid.
    pub fn pipeline(self, seed: u32, width: usize, height: usize) -> Chain<Cell> {
        match self {
            Mode::Height | Mode::Humidity => {
                Chain::new().then(NoiseFilter::new(seed, width, height))
            }
            Mode::Round => Chain::new()
                .then(Constant(Cell::new(1.0, 1.0)))
                .then(RoundIsland::new(width, height)),
            Mode::All => Chain::new()
                .then(NoiseFilter::new(seed, width, height))
                .then(SquareIsland::new(width, height))
                .then(SquareIsland::new(width, height)),
        }
    }
}
