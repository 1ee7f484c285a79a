//! Island shape masks.
//!
//! Both masks scale a cell's height by `1 - d^4`, where `d` is the cell's
//! normalized distance from the grid center clamped to [0, 1]. The center
//! keeps its height, the border is pushed to zero. Humidity is never touched.

use crate::cell::Cell;
use crate::filter::Filter;

/// Height multiplier for a normalized center distance.
///
/// The distance is clamped before the fourth power is taken.
pub fn falloff(distance: f64) -> f64 {
    let d = distance.clamp(0.0, 1.0);
    1.0 - d * d * d * d
}

/// Offset of `(x, y)` from the grid center, each axis scaled to [-1, 1].
fn normalized_offset(x: usize, y: usize, half_w: f64, half_h: f64) -> (f64, f64) {
    ((x as f64 - half_w) / half_w, (y as f64 - half_h) / half_h)
}

/// Euclidean falloff: circular landmass.
#[derive(Debug, Clone, Copy)]
pub struct RoundIsland {
    half_w: f64,
    half_h: f64,
}

impl RoundIsland {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            half_w: width as f64 / 2.0,
            half_h: height as f64 / 2.0,
        }
    }

    pub fn factor(&self, x: usize, y: usize) -> f64 {
        let (dx, dy) = normalized_offset(x, y, self.half_w, self.half_h);
        falloff((dx * dx + dy * dy).sqrt())
    }
}

impl Filter<Cell> for RoundIsland {
    fn apply(&self, mut cell: Cell, x: usize, y: usize) -> Cell {
        cell.height *= self.factor(x, y);
        cell
    }
}

/// Chebyshev (max of axes) falloff: square landmass.
#[derive(Debug, Clone, Copy)]
pub struct SquareIsland {
    half_w: f64,
    half_h: f64,
}

impl SquareIsland {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            half_w: width as f64 / 2.0,
            half_h: height as f64 / 2.0,
        }
    }

    pub fn factor(&self, x: usize, y: usize) -> f64 {
        let (dx, dy) = normalized_offset(x, y, self.half_w, self.half_h);
        falloff(dx.abs().max(dy.abs()))
    }
}

impl Filter<Cell> for SquareIsland {
    fn apply(&self, mut cell: Cell, x: usize, y: usize) -> Cell {
        cell.height *= self.factor(x, y);
        cell
    }
}
