//! A generated world: grid, active pipeline and last rendered image.
//!
//! [`World`] is what a presentation shell drives. Each user action (new
//! seed, next mode) regenerates the grid and re-rasterizes it. When a
//! generation pass fails, the previous image is kept so a partially filled
//! grid is never shown.

use crate::colormap::ColorMap;
use crate::config::WorldConfig;
use crate::mode::Mode;
use log::{debug, warn};
use wgen_core::{Cell, Chain, Filter, Grid, TileLayout, WorldError};

pub struct World {
    grid: Grid<Cell>,
    pipeline: Chain<Cell>,
    mode: Mode,
    seed: u32,
    color_map: Option<ColorMap>,
    image: Vec<u8>,
}

impl World {
    /// Builds an ungenerated world from a validated config.
    pub fn new(config: &WorldConfig) -> Result<Self, WorldError> {
        Self::with_layout(config, TileLayout::default())
    }

    pub fn with_layout(config: &WorldConfig, layout: TileLayout) -> Result<Self, WorldError> {
        config.validate()?;
        let grid = Grid::with_layout(config.width, config.height, layout)?;
        Ok(Self {
            pipeline: config.mode.pipeline(config.seed, config.width, config.height),
            grid,
            mode: config.mode,
            seed: config.seed,
            color_map: config.color_map,
            image: Vec::new(),
        })
    }

    pub fn grid(&self) -> &Grid<Cell> {
        &self.grid
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The color map in use: the override if set, else the mode's map.
    pub fn color_map(&self) -> ColorMap {
        self.color_map.unwrap_or_else(|| self.mode.color_map())
    }

    pub fn set_color_map(&mut self, color_map: Option<ColorMap>) {
        self.color_map = color_map;
    }

    /// The last successfully rendered RGBA buffer (empty before the first render).
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    /// Regenerates the grid with the current pipeline and re-rasterizes it.
    ///
    /// On failure the previous image is left untouched.
    pub fn refresh(&mut self) -> Result<(), WorldError> {
        self.grid.generate_from_filter(&self.pipeline)?;
        self.image = self.grid.rasterize(self.color_map().function());
        debug!(
            "rendered mode {} seed {} with {} colors",
            self.mode.name(),
            self.seed,
            self.color_map().name()
        );
        Ok(())
    }

    /// Switches to `seed` and refreshes. The pipeline is reseeded only when
    /// the seed actually changes.
    pub fn reseed(&mut self, seed: u32) -> Result<(), WorldError> {
        if seed != self.seed {
            self.seed = seed;
            self.pipeline.reseed(seed);
        }
        self.refresh()
    }

    /// Switches to `mode`, rebuilding its pipeline, and refreshes.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), WorldError> {
        self.mode = mode;
        self.pipeline = mode.pipeline(self.seed, self.grid.width(), self.grid.height());
        self.refresh()
    }

    /// Advances to the next mode in display order and refreshes.
    pub fn cycle_mode(&mut self) -> Result<Mode, WorldError> {
        let next = self.mode.next();
        self.set_mode(next)?;
        Ok(next)
    }

    /// Replaces the pipeline with a custom composition and refreshes.
    ///
    /// The chain is reseeded with the world's current seed first, so its
    /// seeded stages agree with [`World::seed`].
    pub fn set_pipeline(&mut self, mut pipeline: Chain<Cell>) -> Result<(), WorldError> {
        pipeline.reseed(self.seed);
        self.pipeline = pipeline;
        self.refresh().inspect_err(|e| warn!("custom pipeline failed: {e}"))
    }
}
