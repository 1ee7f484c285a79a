//! Fixed-size dense grid with tile-parallel generation.
//!
//! A `Grid<T>` stores `width * height` values in row-major order
//! (`index = x + y * width`). Coordinate access is bounds-checked and never
//! wraps. Generation splits the storage into the disjoint tiles of a
//! [`TileLayout`] and fills each tile on its own scoped thread; the call
//! returns only after every worker has been joined.

use crate::color::Rgba;
use crate::error::WorldError;
use crate::filter::Filter;
use crate::tile::{Tile, TileLayout};
use log::debug;
use std::thread;
use std::time::Instant;

/// Reference grid width.
pub const DEFAULT_WIDTH: usize = 800;
/// Reference grid height.
pub const DEFAULT_HEIGHT: usize = 800;

/// A dense 2D grid of `T` with fixed dimensions.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    layout: TileLayout,
    data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    /// Creates a default-filled grid split into the default 8x8 tile layout.
    ///
    /// Returns `WorldError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, WorldError> {
        Self::with_layout(width, height, TileLayout::default())
    }

    /// Creates a default-filled grid generated with the given tile layout.
    pub fn with_layout(
        width: usize,
        height: usize,
        layout: TileLayout,
    ) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(WorldError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            layout,
            data: vec![T::default(); len],
        })
    }
}

impl<T> Grid<T> {
    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn layout(&self) -> TileLayout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: TileLayout) {
        self.layout = layout;
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, WorldError> {
        if x >= self.width || y >= self.height {
            return Err(WorldError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(x + y * self.width)
    }
}

impl<T: Copy> Grid<T> {
    /// Returns the value at `(x, y)`, or `WorldError::OutOfBounds`.
    pub fn get(&self, x: usize, y: usize) -> Result<T, WorldError> {
        Ok(self.data[self.index(x, y)?])
    }

    /// Overwrites the value at `(x, y)`, or returns `WorldError::OutOfBounds`.
    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<(), WorldError> {
        let idx = self.index(x, y)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Iterates over all cells yielding `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(i, &v)| (i % self.width, i / self.width, v))
    }

    /// Maps every cell through `color_of` into an RGBA8 pixel buffer.
    ///
    /// Pixels are written row-major, four bytes (R, G, B, A) each, so the
    /// buffer length is `width * height * 4`.
    pub fn rasterize<C>(&self, color_of: C) -> Vec<u8>
    where
        C: Fn(T) -> Rgba,
    {
        self.data
            .iter()
            .flat_map(|&cell| color_of(cell).to_bytes())
            .collect()
    }
}

impl<T: Copy + Default + Send> Grid<T> {
    /// Overwrites every cell with `f(x, y)`, computed in parallel per tile.
    ///
    /// Returns `WorldError::WorkerPanicked` for the first tile (in tile order)
    /// whose worker panicked. Cells of a failed tile are left unspecified.
    pub fn generate<F>(&mut self, f: F) -> Result<(), WorldError>
    where
        F: Fn(usize, usize) -> T + Sync,
    {
        self.fill_tiles(&f)
    }

    /// Overwrites every cell with `filter.apply(T::default(), x, y)`.
    ///
    /// Each cell starts from a fresh default value; the grid's previous
    /// contents are never read, so a pass is fully determined by the filter.
    pub fn generate_from_filter<F>(&mut self, filter: &F) -> Result<(), WorldError>
    where
        F: Filter<T> + ?Sized,
    {
        self.fill_tiles(&|x, y| filter.apply(T::default(), x, y))
    }

    fn fill_tiles<F>(&mut self, cell_at: &F) -> Result<(), WorldError>
    where
        F: Fn(usize, usize) -> T + Sync,
    {
        let started = Instant::now();
        let (width, height) = (self.width, self.height);
        let layout = self.layout.fitted(width, height);
        let tiles = layout.tiles(width, height);
        let columns = layout.column_spans(width);

        // Hand each tile the row segments it owns. Splitting the storage this
        // way keeps every write disjoint without locks.
        let mut segments: Vec<Vec<&mut [T]>> = tiles
            .iter()
            .map(|tile| Vec::with_capacity(tile.height))
            .collect();
        for (y, row) in self.data.chunks_mut(width).enumerate() {
            let first = layout.row_of(y, height) * layout.columns();
            let mut rest = row;
            for (col, &(x0, x1)) in columns.iter().enumerate() {
                let (segment, tail) = std::mem::take(&mut rest).split_at_mut(x1 - x0);
                segments[first + col].push(segment);
                rest = tail;
            }
        }

        let failed: Vec<Tile> = thread::scope(|s| {
            let workers: Vec<_> = tiles
                .iter()
                .zip(segments)
                .filter(|(tile, _)| !tile.is_empty())
                .map(|(&tile, rows)| (tile, s.spawn(move || fill_tile(tile, rows, cell_at))))
                .collect();
            workers
                .into_iter()
                .filter_map(|(tile, handle)| handle.join().err().map(|_| tile))
                .collect()
        });

        debug!(
            "generated {}x{} grid over {} tiles in {:?}",
            width,
            height,
            tiles.len(),
            started.elapsed()
        );

        match failed.first() {
            Some(tile) => Err(WorldError::WorkerPanicked {
                x: tile.x,
                y: tile.y,
                width: tile.width,
                height: tile.height,
            }),
            None => Ok(()),
        }
    }
}

/// Fills one tile's row segments, top row first.
fn fill_tile<T, F>(tile: Tile, rows: Vec<&mut [T]>, cell_at: &F)
where
    F: Fn(usize, usize) -> T,
{
    for (dy, row) in rows.into_iter().enumerate() {
        let y = tile.y + dy;
        for (dx, slot) in row.iter_mut().enumerate() {
            *slot = cell_at(tile.x + dx, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::filter::Chain;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn coordinate_cell(x: usize, y: usize) -> Cell {
        Cell::new(x as f64, y as f64)
    }

    // -- Constructor tests --

    #[test]
    fn new_creates_default_filled_grid() {
        let grid: Grid<Cell> = Grid::new(4, 3).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.data().len(), 12);
        assert!(grid.data().iter().all(|&c| c == Cell::default()));
        assert_eq!(grid.layout(), TileLayout::default());
    }

    #[test]
    fn new_with_zero_dimension_returns_error() {
        assert!(matches!(
            Grid::<Cell>::new(0, 5),
            Err(WorldError::InvalidDimensions)
        ));
        assert!(matches!(
            Grid::<Cell>::new(5, 0),
            Err(WorldError::InvalidDimensions)
        ));
    }

    #[test]
    fn new_with_overflow_dimensions_returns_error() {
        assert!(Grid::<u8>::new(usize::MAX, 2).is_err());
    }

    // -- Indexed access --

    #[test]
    fn get_and_set_round_trip() {
        let mut grid: Grid<Cell> = Grid::new(5, 5).unwrap();
        grid.set(2, 3, Cell::new(0.4, 0.6)).unwrap();
        assert_eq!(grid.get(2, 3).unwrap(), Cell::new(0.4, 0.6));
        assert_eq!(grid.data()[2 + 3 * 5], Cell::new(0.4, 0.6));
    }

    #[test]
    fn out_of_range_access_fails_instead_of_wrapping() {
        let mut grid: Grid<Cell> = Grid::new(6, 4).unwrap();
        assert!(matches!(
            grid.get(6, 0),
            Err(WorldError::OutOfBounds { x: 6, y: 0, width: 6, height: 4 })
        ));
        assert!(matches!(grid.get(0, 4), Err(WorldError::OutOfBounds { .. })));
        assert!(matches!(
            grid.set(usize::MAX, 1, Cell::default()),
            Err(WorldError::OutOfBounds { .. })
        ));
        assert!(grid.get(5, 3).is_ok());
    }

    #[test]
    fn iter_yields_row_major_triples() {
        let mut grid: Grid<u32> = Grid::new(3, 2).unwrap();
        grid.generate(|x, y| (x + y * 3) as u32).unwrap();
        let triples: Vec<_> = grid.iter().collect();
        assert_eq!(triples[0], (0, 0, 0));
        assert_eq!(triples[2], (2, 0, 2));
        assert_eq!(triples[3], (0, 1, 3));
        assert_eq!(triples.len(), 6);
    }

    // -- Generation --

    #[test]
    fn eight_by_eight_grid_holds_one_cell_per_tile() {
        let mut grid: Grid<Cell> = Grid::new(8, 8).unwrap();
        grid.generate(|x, y| Cell::new((x + y * 8) as f64, 0.0))
            .unwrap();
        assert_eq!(grid.get(3, 2).unwrap().height, 19.0);
    }

    #[test]
    fn generate_writes_every_cell_from_its_coordinates() {
        let mut grid: Grid<Cell> = Grid::new(803, 797).unwrap();
        grid.generate(coordinate_cell).unwrap();
        for (x, y, cell) in grid.iter() {
            assert_eq!(cell, coordinate_cell(x, y));
        }
    }

    #[test]
    fn generate_calls_the_function_once_per_cell() {
        let calls = AtomicUsize::new(0);
        let mut grid: Grid<u8> = Grid::new(37, 29).unwrap();
        grid.generate(|_, _| {
            calls.fetch_add(1, Ordering::Relaxed);
            1
        })
        .unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 37 * 29);
        assert!(grid.data().iter().all(|&v| v == 1));
    }

    #[test]
    fn grids_smaller_than_the_layout_are_filled() {
        let mut grid: Grid<Cell> = Grid::new(3, 5).unwrap();
        grid.generate(coordinate_cell).unwrap();
        for (x, y, cell) in grid.iter() {
            assert_eq!(cell, coordinate_cell(x, y));
        }
    }

    #[test]
    fn layouts_larger_than_the_grid_are_fitted_to_it() {
        let layout = TileLayout::new(32, 32).unwrap();
        let mut grid: Grid<u8> = Grid::with_layout(4, 4, layout).unwrap();
        grid.generate(|_, _| 1).unwrap();
        assert!(grid.data().iter().all(|&v| v == 1));
        assert_eq!(grid.layout(), layout);
    }

    #[test]
    fn failing_cell_in_a_fitted_layout_names_its_single_cell_tile() {
        let mut grid: Grid<u8> = Grid::with_layout(3, 2, TileLayout::new(30, 30).unwrap()).unwrap();
        let result = grid.generate(|x, y| {
            if (x, y) == (2, 1) {
                panic!("bad cell");
            }
            0
        });
        assert!(matches!(
            result,
            Err(WorldError::WorkerPanicked { x: 2, y: 1, width: 1, height: 1 })
        ));
    }

    #[test]
    fn custom_layout_produces_the_same_grid() {
        let mut default_tiles: Grid<Cell> = Grid::new(50, 30).unwrap();
        let mut custom_tiles: Grid<Cell> =
            Grid::with_layout(50, 30, TileLayout::new(3, 7).unwrap()).unwrap();
        default_tiles.generate(coordinate_cell).unwrap();
        custom_tiles.generate(coordinate_cell).unwrap();
        assert_eq!(default_tiles.data(), custom_tiles.data());
    }

    #[test]
    fn filter_generation_starts_from_default_not_previous_contents() {
        let mut grid: Grid<Cell> = Grid::new(16, 16).unwrap();
        grid.generate(|_, _| Cell::new(9.0, 9.0)).unwrap();
        let bump = |mut c: Cell, _x: usize, _y: usize| {
            c.height += 0.5;
            c
        };
        grid.generate_from_filter(&bump).unwrap();
        assert!(grid.data().iter().all(|&c| c == Cell::new(0.5, 0.0)));
    }

    #[test]
    fn filter_generation_accepts_chains_and_trait_objects() {
        let chain = Chain::new()
            .then(|c: Cell, x: usize, _y: usize| Cell::new(c.height + x as f64, c.humidity))
            .then(|c: Cell, _x: usize, y: usize| Cell::new(c.height, c.humidity + y as f64));
        let boxed: Box<dyn Filter<Cell>> = Box::new(chain);
        let mut grid: Grid<Cell> = Grid::new(20, 12).unwrap();
        grid.generate_from_filter(boxed.as_ref()).unwrap();
        assert_eq!(grid.get(7, 5).unwrap(), Cell::new(7.0, 5.0));
    }

    #[test]
    fn worker_panic_surfaces_as_error_for_its_tile() {
        let mut grid: Grid<Cell> = Grid::new(16, 16).unwrap();
        let result = grid.generate(|x, y| {
            if (x, y) == (5, 9) {
                panic!("bad cell");
            }
            coordinate_cell(x, y)
        });
        assert!(matches!(
            result,
            Err(WorldError::WorkerPanicked { x: 4, y: 8, width: 2, height: 2 })
        ));
        // Other tiles were still filled.
        assert_eq!(grid.get(0, 0).unwrap(), coordinate_cell(0, 0));
        assert_eq!(grid.get(15, 15).unwrap(), coordinate_cell(15, 15));
    }

    #[test]
    fn first_failing_tile_is_reported() {
        let mut grid: Grid<u8> = Grid::new(8, 8).unwrap();
        let result = grid.generate(|x, y| {
            if y >= 6 || x == 7 {
                panic!("fail");
            }
            0
        });
        assert!(matches!(
            result,
            Err(WorldError::WorkerPanicked { x: 7, y: 0, .. })
        ));
    }

    // -- Rasterization --

    #[test]
    fn rasterize_produces_row_major_rgba() {
        let mut grid: Grid<Cell> = Grid::new(3, 2).unwrap();
        grid.generate(coordinate_cell).unwrap();
        let buf = grid.rasterize(|c| Rgba::new(c.height as u8, c.humidity as u8, 7, 200));
        assert_eq!(buf.len(), 3 * 2 * 4);
        assert_eq!(&buf[0..4], &[0, 0, 7, 200]);
        assert_eq!(&buf[4..8], &[1, 0, 7, 200]);
        assert_eq!(&buf[12..16], &[0, 1, 7, 200]);
        assert_eq!(&buf[20..24], &[2, 1, 7, 200]);
    }

    #[test]
    fn rasterize_does_not_mutate_the_grid() {
        let mut grid: Grid<Cell> = Grid::new(4, 4).unwrap();
        grid.generate(coordinate_cell).unwrap();
        let before = grid.clone();
        let _ = grid.rasterize(|_| Rgba::rgb(0, 0, 0));
        assert_eq!(before.data(), grid.data());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn dimension() -> impl Strategy<Value = usize> {
            1_usize..=48
        }

        fn hashed(x: usize, y: usize, salt: u64) -> u64 {
            let mut h = (x as u64) << 32 ^ y as u64 ^ salt;
            h ^= h >> 33;
            h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
            h ^ (h >> 29)
        }

        proptest! {
            #[test]
            fn generate_matches_the_function_everywhere(
                w in dimension(),
                h in dimension(),
                columns in 1_usize..=10,
                rows in 1_usize..=10,
                salt in any::<u64>(),
            ) {
                let layout = TileLayout::new(columns, rows).unwrap();
                let mut grid: Grid<u64> = Grid::with_layout(w, h, layout).unwrap();
                grid.generate(|x, y| hashed(x, y, salt)).unwrap();
                for y in 0..h {
                    for x in 0..w {
                        prop_assert_eq!(grid.get(x, y).unwrap(), hashed(x, y, salt));
                    }
                }
            }

            #[test]
            fn rasterize_decodes_back_to_per_cell_colors(
                w in dimension(),
                h in dimension(),
                salt in any::<u64>(),
            ) {
                let mut grid: Grid<u64> = Grid::new(w, h).unwrap();
                grid.generate(|x, y| hashed(x, y, salt)).unwrap();
                let color_of = |v: u64| Rgba::from_bytes(v.to_le_bytes()[..4].try_into().unwrap());
                let buf = grid.rasterize(color_of);
                prop_assert_eq!(buf.len(), w * h * 4);
                for (i, px) in buf.chunks_exact(4).enumerate() {
                    let (x, y) = (i % w, i / w);
                    let expected = color_of(grid.get(x, y).unwrap()).to_bytes();
                    prop_assert_eq!(px, &expected[..]);
                }
            }
        }
    }
}
