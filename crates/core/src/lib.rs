#![deny(unsafe_code)]
//! Core types for the wgen procedural world generator.
//!
//! Provides the `Cell` value type, the fixed-size `Grid<T>` with tile-parallel
//! generation, the `Filter` trait and `Chain` composition, the `Rgba` pixel
//! type, and the built-in noise and island-shape filters.

pub mod cell;
pub mod color;
pub mod error;
pub mod filter;
pub mod grid;
pub mod noise_filter;
pub mod shape;
pub mod tile;

pub use cell::Cell;
pub use color::Rgba;
pub use error::WorldError;
pub use filter::{compose, Chain, Constant, Filter, Identity};
pub use grid::{Grid, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use noise_filter::{NoiseFilter, Octaves};
pub use shape::{RoundIsland, SquareIsland};
pub use tile::{Tile, TileLayout, MAX_TILES};
