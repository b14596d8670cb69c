//! The owned fire simulation.
//!
//! `FireSimulation` bundles everything one fire needs between ticks: its grid
//! shape, its own random source, the tunable parameters and a reference to
//! the immutable palette. Buffers stay with the caller and are lent to
//! [`FireSimulation::tick`] once per frame.

use tracing::{debug, info, warn, Level};
use xxhash_rust::xxh32::Xxh32;

use crate::engine;
use crate::error::FireError;
use crate::grid::{FireBuffers, GridShape};
use crate::palette::{PaletteColor, FIRE_PALETTE, PALETTE_LEN};
use crate::params::{FireControl, FireParams};
use crate::random::{FireRng, DEFAULT_SEED};

/// A seeded fire over a cube of side `N`.
#[derive(Debug, Clone)]
pub struct FireSimulation {
    shape: GridShape,
    params: FireParams,
    rng: FireRng,
    /// Seed the random source was last (re)seeded with; `reset` returns to it.
    seed: u32,
    palette: &'static [PaletteColor; PALETTE_LEN],
    ticks: u64,
    /// Floor nudges requested since the last tick, oldest first.
    pending_controls: Vec<FireControl>,
}

impl FireSimulation {
    /// Reference fire with the default seed.
    #[must_use]
    pub fn new(shape: GridShape) -> Self {
        Self::with_seed(shape, DEFAULT_SEED)
    }

    /// Reference fire with a chosen seed.
    #[must_use]
    pub fn with_seed(shape: GridShape, seed: u32) -> Self {
        info!(
            "Creating fire simulation: side={}, overscan={:?}, seed={:#010x}",
            shape.side(),
            shape.overscan(),
            seed
        );

        Self {
            shape,
            params: FireParams::reference(),
            rng: FireRng::new(seed),
            seed,
            palette: &FIRE_PALETTE,
            ticks: 0,
            pending_controls: Vec::new(),
        }
    }

    /// Fire with custom parameters.
    ///
    /// # Errors
    ///
    /// Returns [`FireError::InvalidParameter`] if `params` fails validation.
    pub fn with_params(shape: GridShape, seed: u32, params: FireParams) -> Result<Self, FireError> {
        params.validate()?;
        let mut sim = Self::with_seed(shape, seed);
        sim.params = params;
        Ok(sim)
    }

    /// Grid shape the simulation was built for.
    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    /// Current parameters.
    pub fn params(&self) -> &FireParams {
        &self.params
    }

    /// Seed of the current random sequence.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Ticks completed since construction, reseed or reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Palette used for color resolution.
    pub fn palette(&self) -> &'static [PaletteColor; PALETTE_LEN] {
        self.palette
    }

    /// Replace the parameters. Takes effect on the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`FireError::InvalidParameter`] and keeps the old parameters
    /// if `params` fails validation.
    pub fn set_params(&mut self, params: FireParams) -> Result<(), FireError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Apply a host control hook.
    ///
    /// Steps the injection strength now and queues a floor nudge for the
    /// next tick, which heats or cools every floor cell once. Without the
    /// nudge a saturated floor would never react to the hook.
    pub fn apply_control(&mut self, control: FireControl) {
        self.params.apply(control);
        self.pending_controls.push(control);
        info!(
            "Fire control {:?}: injection strength now {:.1}",
            control, self.params.injection_strength
        );
    }

    /// "Increase fire intensity" hook.
    pub fn increase_intensity(&mut self) {
        self.apply_control(FireControl::Increase);
    }

    /// "Decrease fire intensity" hook.
    pub fn decrease_intensity(&mut self) {
        self.apply_control(FireControl::Decrease);
    }

    /// Floor nudges that the next tick will apply.
    pub fn pending_controls(&self) -> &[FireControl] {
        &self.pending_controls
    }

    /// Restart the random sequence from `seed`. Parameters are kept; queued
    /// floor nudges are dropped.
    pub fn reseed(&mut self, seed: u32) {
        info!("Reseeding fire simulation with {:#010x}", seed);
        self.seed = seed;
        self.rng.seed(seed);
        self.ticks = 0;
        self.pending_controls.clear();
    }

    /// Restart the random sequence from the current seed.
    ///
    /// The caller owns the buffers and clears them itself (see
    /// [`FireBuffers::clear`]) if it wants a cold start.
    pub fn reset(&mut self) {
        self.reseed(self.seed);
    }

    /// Run one tick: queued floor nudges, source injection, propagation,
    /// color resolution.
    ///
    /// # Errors
    ///
    /// Fails without touching either buffer if their lengths do not match
    /// the grid shape or any intensity is outside `[0, 36]`.
    pub fn tick(&mut self, intensity: &mut [i32], colors: &mut [f32]) -> Result<(), FireError> {
        if let Err(err) = self.shape.validate(intensity, colors) {
            warn!("Rejected fire tick {}: {}", self.ticks, err);
            return Err(err);
        }

        for control in self.pending_controls.drain(..) {
            engine::nudge_source(&self.shape, control, &mut self.rng, intensity);
        }
        engine::run_tick(
            &self.shape,
            &self.params,
            &mut self.rng,
            self.palette,
            intensity,
            colors,
        );
        self.ticks += 1;

        if tracing::enabled!(Level::DEBUG) {
            let stats = IntensityStats::from_grid(&self.shape, intensity);
            debug!(
                "Fire tick {}: mean={:.2}, max={}, lit={}/{}",
                self.ticks,
                stats.mean,
                stats.max,
                stats.lit_cells,
                self.shape.cell_count()
            );
        }

        Ok(())
    }

    /// [`FireSimulation::tick`] for hosts that pass the side length every frame.
    ///
    /// # Errors
    ///
    /// Returns [`FireError::SideMismatch`] if `side` differs from the
    /// simulation's, otherwise as [`FireSimulation::tick`].
    pub fn tick_with_side(
        &mut self,
        side: usize,
        intensity: &mut [i32],
        colors: &mut [f32],
    ) -> Result<(), FireError> {
        if side != self.shape.side() {
            let err = FireError::SideMismatch {
                expected: self.shape.side(),
                actual: side,
            };
            warn!("Rejected fire tick {}: {}", self.ticks, err);
            return Err(err);
        }
        self.tick(intensity, colors)
    }

    /// [`FireSimulation::tick`] over owned buffers.
    ///
    /// # Errors
    ///
    /// As [`FireSimulation::tick`].
    pub fn tick_buffers(&mut self, buffers: &mut FireBuffers) -> Result<(), FireError> {
        self.tick(&mut buffers.intensity, &mut buffers.colors)
    }
}

/// Summary of an intensity grid, cube cells only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityStats {
    /// Mean intensity.
    pub mean: f32,
    /// Highest intensity.
    pub max: i32,
    /// Cells with non-zero intensity.
    pub lit_cells: usize,
    /// `xxh32` of the little-endian intensities, for comparing runs.
    pub checksum: u32,
}

impl IntensityStats {
    /// Summarize the cube part of `intensity`.
    #[must_use]
    pub fn from_grid(shape: &GridShape, intensity: &[i32]) -> Self {
        let cells = &intensity[..shape.cell_count()];
        let mut hasher = Xxh32::new(0);
        let mut sum: i64 = 0;
        let mut max = 0;
        let mut lit_cells = 0;

        for &value in cells {
            hasher.update(&value.to_le_bytes());
            sum += i64::from(value);
            max = max.max(value);
            if value > 0 {
                lit_cells += 1;
            }
        }

        Self {
            mean: sum as f32 / cells.len() as f32,
            max,
            lit_cells,
            checksum: hasher.digest(),
        }
    }
}
