//! Coherent-noise stage that seeds a cell's height and humidity.
//!
//! [`NoiseFilter`] ignores its input cell and samples multi-octave Perlin
//! noise twice per cell: once for height (coarse, offset coordinates) and
//! once for humidity (finer, unshifted coordinates). The Perlin generator is
//! an owned field rebuilt only when the seed actually changes, so the same
//! seed always reproduces the same world.

use crate::cell::Cell;
use crate::filter::Filter;
use noise::{NoiseFn, Perlin};

/// Coordinate offset applied before sampling height, so height and humidity
/// read unrelated regions of the same noise space.
const HEIGHT_OFFSET: (f64, f64) = (78943.0, 94567.0);
/// Height features span roughly a third of the grid.
const HEIGHT_FEATURE_DIVISOR: f64 = 3.0;
/// Humidity features span roughly a tenth of the grid.
const HUMIDITY_FEATURE_DIVISOR: f64 = 10.0;

/// Fractal sum parameters for one noise channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Octaves {
    pub count: u32,
    /// Amplitude multiplier per octave.
    pub persistence: f64,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
}

impl Octaves {
    pub const fn new(count: u32) -> Self {
        Self {
            count,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }

    /// Sums `count` octaves of `noise` at `(x, y)` and maps the result to
    /// roughly [0, 1]. The result is not clamped.
    pub fn sample(&self, noise: &Perlin, x: f64, y: f64) -> f64 {
        let (total, max_amp, _, _) = (0..self.count.max(1)).fold(
            (0.0, 0.0, 1.0, 1.0),
            |(total, max_amp, amp, freq), _| {
                (
                    total + noise.get([x * freq, y * freq]) * amp,
                    max_amp + amp,
                    amp * self.persistence,
                    freq * self.lacunarity,
                )
            },
        );
        (total / max_amp) * 0.5 + 0.5
    }
}

/// Fills a cell from scratch with noise-derived height and humidity.
pub struct NoiseFilter {
    seed: u32,
    noise: Perlin,
    height_scale: (f64, f64),
    humidity_scale: (f64, f64),
    pub height_octaves: Octaves,
    pub humidity_octaves: Octaves,
}

impl NoiseFilter {
    /// Creates a noise stage for a `width x height` grid.
    pub fn new(seed: u32, width: usize, height: usize) -> Self {
        let (w, h) = (width as f64, height as f64);
        Self {
            seed,
            noise: Perlin::new(seed),
            height_scale: (w / HEIGHT_FEATURE_DIVISOR, h / HEIGHT_FEATURE_DIVISOR),
            humidity_scale: (w / HUMIDITY_FEATURE_DIVISOR, h / HUMIDITY_FEATURE_DIVISOR),
            height_octaves: Octaves::new(4),
            humidity_octaves: Octaves::new(3),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Rebuilds the generator if `seed` differs from the current seed.
    ///
    /// Returns `true` when the generator was rebuilt.
    pub fn set_seed(&mut self, seed: u32) -> bool {
        if seed == self.seed {
            return false;
        }
        self.seed = seed;
        self.noise = Perlin::new(seed);
        true
    }

    pub fn height_at(&self, x: usize, y: usize) -> f64 {
        let sx = (x as f64 + HEIGHT_OFFSET.0) / self.height_scale.0;
        let sy = (y as f64 + HEIGHT_OFFSET.1) / self.height_scale.1;
        self.height_octaves.sample(&self.noise, sx, sy)
    }

    pub fn humidity_at(&self, x: usize, y: usize) -> f64 {
        let sx = x as f64 / self.humidity_scale.0;
        let sy = y as f64 / self.humidity_scale.1;
        self.humidity_octaves.sample(&self.noise, sx, sy)
    }
}

impl Filter<Cell> for NoiseFilter {
    fn apply(&self, _cell: Cell, x: usize, y: usize) -> Cell {
        Cell {
            height: self.height_at(x, y),
            humidity: self.humidity_at(x, y),
        }
    }

    fn reseed(&mut self, seed: u32) {
        self.set_seed(seed);
    }
}
