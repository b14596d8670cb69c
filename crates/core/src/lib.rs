//! Doom Fire Simulation Core Library
//!
//! A deterministic procedural fire over a 3D grid. A seeded random source
//! drives a cellular automaton: fresh intensity is injected at the floor of
//! the grid, propagates upward with random decay and a lateral lean, and is
//! resolved through a fixed 37-color palette into an RGBA buffer the host
//! renders directly.
//!
//! ## Tick
//!
//! The embedding host owns the intensity and color buffers and lends them
//! to [`FireSimulation::tick`] once per frame:
//! - Source injection (floor layer, with overscan)
//! - Propagation (in place, index-ascending)
//! - Color resolution (palette lookup, full overwrite)
//!
//! Same seed, same parameters, same sequence of ticks: bit-identical buffers.

// Leaf components
pub mod error;
pub mod grid;
pub mod palette;
pub mod params;
pub mod random;

// Update engine and the owned simulation
pub mod engine;
pub mod simulation;

pub use error::FireError;
pub use grid::{FireBuffers, GridShape, SourceOverscan};
pub use palette::{PaletteColor, FIRE_PALETTE, MAX_INTENSITY, PALETTE_LEN};
pub use params::{DriftMode, FireControl, FireParams};
pub use random::{FireRng, DEFAULT_SEED};
pub use simulation::{FireSimulation, IntensityStats};
