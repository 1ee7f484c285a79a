//! The per-point value stored in a world grid.

use serde::{Deserialize, Serialize};

/// Scalar attributes of one grid point.
///
/// Both attributes are expected to lie in [0, 1] but nothing enforces it:
/// noise stages may overshoot slightly and color maps clamp on output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub height: f64,
    pub humidity: f64,
}

impl Cell {
    pub const fn new(height: f64, humidity: f64) -> Self {
        Self { height, humidity }
    }
}
