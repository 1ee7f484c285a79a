//! Cell-to-color maps used at rasterization time.
//!
//! Every map is a pure function of one [`Cell`]; nothing here runs during
//! generation.

use serde::{Deserialize, Serialize};
use wgen_core::{Cell, Rgba, WorldError};

/// Names accepted by [`ColorMap::from_name`].
const COLOR_MAP_NAMES: &[&str] = &["height", "humidity", "biome"];

const DEEP_WATER: Rgba = Rgba::rgb(0, 51, 153);
const SHALLOW_WATER: Rgba = Rgba::rgb(0, 153, 255);
const POLAR: Rgba = Rgba::rgb(240, 240, 240);
const ALPINE_FOREST: Rgba = Rgba::rgb(0, 51, 0);
const HIGHLAND_WET: Rgba = Rgba::rgb(0, 102, 102);
const HIGHLAND_DRY: Rgba = Rgba::rgb(116, 139, 123);
const MIDLAND_WET: Rgba = Rgba::rgb(0, 153, 153);
const MIDLAND_TEMPERATE: Rgba = Rgba::rgb(51, 153, 102);
const MIDLAND_DRY: Rgba = Rgba::rgb(190, 194, 131);
const LOWLAND_DRY: Rgba = Rgba::rgb(227, 231, 107);
const LOWLAND_TEMPERATE: Rgba = Rgba::rgb(0, 179, 63);
const LOWLAND_WET: Rgba = Rgba::rgb(0, 153, 0);

/// Grayscale by height.
pub fn height_gray(cell: Cell) -> Rgba {
    let v = Rgba::channel(cell.height);
    Rgba::rgb(v, v, v)
}

/// Green channel by humidity.
pub fn humidity_green(cell: Cell) -> Rgba {
    Rgba::rgb(0, Rgba::channel(cell.humidity), 0)
}

/// Biome classifier: height bands first, humidity splits the middle bands.
pub fn biome(cell: Cell) -> Rgba {
    let (h, m) = (cell.height, cell.humidity);
    if h < 0.3 {
        return DEEP_WATER;
    }
    if h < 0.4 {
        return SHALLOW_WATER;
    }
    if h > 0.9 {
        return POLAR;
    }
    if h > 0.8 {
        return ALPINE_FOREST;
    }
    if h > 0.7 {
        return if m > 0.4 { HIGHLAND_WET } else { HIGHLAND_DRY };
    }
    if h > 0.5 {
        return match m {
            m if m > 0.5 => MIDLAND_WET,
            m if m > 0.3 => MIDLAND_TEMPERATE,
            _ => MIDLAND_DRY,
        };
    }
    match m {
        m if m < 0.3 => LOWLAND_DRY,
        m if m < 0.7 => LOWLAND_TEMPERATE,
        _ => LOWLAND_WET,
    }
}

/// A selectable color map, passed explicitly to rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMap {
    Height,
    Humidity,
    Biome,
}

impl ColorMap {
    /// Looks up a color map by name.
    ///
    /// Returns `WorldError::UnknownColorMap` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, WorldError> {
        match name {
            "height" => Ok(ColorMap::Height),
            "humidity" => Ok(ColorMap::Humidity),
            "biome" => Ok(ColorMap::Biome),
            _ => Err(WorldError::UnknownColorMap(name.to_string())),
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        COLOR_MAP_NAMES
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorMap::Height => "height",
            ColorMap::Humidity => "humidity",
            ColorMap::Biome => "biome",
        }
    }

    /// The mapping function for this color map.
    pub fn function(self) -> fn(Cell) -> Rgba {
        match self {
            ColorMap::Height => height_gray,
            ColorMap::Humidity => humidity_green,
            ColorMap::Biome => biome,
        }
    }

    pub fn color_of(self, cell: Cell) -> Rgba {
        (self.function())(cell)
    }
}
