//! Error types for the wgen core.

use thiserror::Error;

/// Errors produced by grid, filter and world operations.
#[derive(Debug, Error)]
pub enum WorldError {
    /// Width or height was zero (or overflowed) when creating a grid.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A tile layout was requested with zero columns or rows, or too many tiles.
    #[error(
        "invalid tile layout: columns and rows must be non-zero with at most {max} tiles",
        max = crate::tile::MAX_TILES
    )]
    InvalidTileLayout,

    /// An (x, y) coordinate was outside the grid bounds.
    #[error("index ({x}, {y}) out of bounds for grid of size ({width}, {height})")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A generation worker panicked while filling its tile.
    #[error("generation worker for tile at ({x}, {y}) size ({width}, {height}) panicked")]
    WorkerPanicked {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A generation mode name was not recognized.
    #[error("unknown mode: {0}")]
    UnknownMode(String),

    /// A color map name was not recognized.
    #[error("unknown color map: {0}")]
    UnknownColorMap(String),

    /// A world config could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A file could not be read or written.
    #[error("i/o error: {0}")]
    Io(String),
}
