#![deny(unsafe_code)]
//! World assembly on top of `wgen-core`: preset modes, color maps, seed
//! sequences, configuration and PNG snapshots.
//!
//! The CLI depends on this crate so that mode dispatch and rendering live in
//! one place rather than in the binary.

pub mod colormap;
pub mod config;
pub mod mode;
pub mod seeds;
pub mod world;

#[cfg(feature = "png")]
pub mod snapshot;

pub use colormap::ColorMap;
pub use config::WorldConfig;
pub use mode::Mode;
pub use seeds::SeedSequence;
pub use world::World;
