//! Rectangular work units for parallel grid generation.
//!
//! A [`TileLayout`] cuts a `width x height` index space into `columns x rows`
//! disjoint rectangles. Each axis is split into `dim / n` sized spans with the
//! final span extended to the true boundary, so every coordinate belongs to
//! exactly one tile even when the dimension is not a multiple of `n`.

use crate::error::WorldError;

/// Tile columns and rows used when no layout is requested.
pub const DEFAULT_TILES_PER_AXIS: usize = 8;

/// Upper bound on `columns * rows`. Each tile gets its own worker thread.
pub const MAX_TILES: usize = 1024;

/// One rectangular block of grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Tile {
    /// True when the tile covers no cells (possible for grids narrower than the layout).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Coordinates covered by the tile in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }
}

/// How many tiles a grid is split into along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    columns: usize,
    rows: usize,
}

impl Default for TileLayout {
    fn default() -> Self {
        Self {
            columns: DEFAULT_TILES_PER_AXIS,
            rows: DEFAULT_TILES_PER_AXIS,
        }
    }
}

impl TileLayout {
    /// Returns `WorldError::InvalidTileLayout` if either count is zero or the
    /// layout would need more than [`MAX_TILES`] tiles.
    pub fn new(columns: usize, rows: usize) -> Result<Self, WorldError> {
        if columns == 0 || rows == 0 {
            return Err(WorldError::InvalidTileLayout);
        }
        match columns.checked_mul(rows) {
            Some(count) if count <= MAX_TILES => Ok(Self { columns, rows }),
            _ => Err(WorldError::InvalidTileLayout),
        }
    }

    /// A near-square layout with at least one tile per available hardware thread.
    ///
    /// Falls back to the default 8x8 layout when the thread count is unknown.
    pub fn for_available_parallelism() -> Self {
        match std::thread::available_parallelism() {
            Ok(n) => Self::for_threads(n.get().min(MAX_TILES)),
            Err(_) => Self::default(),
        }
    }

    fn for_threads(threads: usize) -> Self {
        let threads = threads.max(1);
        let columns = (threads as f64).sqrt().ceil() as usize;
        let rows = threads.div_ceil(columns);
        Self { columns, rows }
    }

    /// The layout actually used for a `width x height` grid: never more tile
    /// columns than grid columns, nor tile rows than grid rows, so no tile is
    /// empty.
    pub fn fitted(&self, width: usize, height: usize) -> Self {
        Self {
            columns: self.columns.min(width).max(1),
            rows: self.rows.min(height).max(1),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn tile_count(&self) -> usize {
        self.columns * self.rows
    }

    /// `(start, end)` spans of each tile column across `width`.
    pub fn column_spans(&self, width: usize) -> Vec<(usize, usize)> {
        spans(width, self.columns)
    }

    /// `(start, end)` spans of each tile row across `height`.
    pub fn row_spans(&self, height: usize) -> Vec<(usize, usize)> {
        spans(height, self.rows)
    }

    /// Index of the tile row containing grid row `y`.
    pub fn row_of(&self, y: usize, height: usize) -> usize {
        span_index(y, height, self.rows)
    }

    /// Index of the tile column containing grid column `x`.
    pub fn column_of(&self, x: usize, width: usize) -> usize {
        span_index(x, width, self.columns)
    }

    /// All tiles for a `width x height` grid, in row-major tile order.
    pub fn tiles(&self, width: usize, height: usize) -> Vec<Tile> {
        let columns = self.column_spans(width);
        self.row_spans(height)
            .into_iter()
            .flat_map(|(y0, y1)| {
                columns.iter().map(move |&(x0, x1)| Tile {
                    x: x0,
                    y: y0,
                    width: x1 - x0,
                    height: y1 - y0,
                })
            })
            .collect()
    }
}

fn spans(dim: usize, n: usize) -> Vec<(usize, usize)> {
    let size = dim / n;
    (0..n)
        .map(|i| {
            let start = i * size;
            let end = if i + 1 == n { dim } else { start + size };
            (start, end)
        })
        .collect()
}

fn span_index(pos: usize, dim: usize, n: usize) -> usize {
    let size = dim / n;
    if size == 0 {
        return n - 1;
    }
    (pos / size).min(n - 1)
}
