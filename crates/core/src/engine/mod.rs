//! Per-tick fire update.
//!
//! A tick runs three phases, strictly in order, over caller-owned buffers:
//!
//! 1. [`inject_source`] - add random intensity to the floor layer
//! 2. [`propagate`] - pull every cell's intensity from the layer below,
//!    with random decay and lateral drift, in place
//! 3. [`resolve_colors`] - map intensities through the palette
//!
//! Control nudges queued by the host ([`nudge_source`]) run before injection.
//! Injection draws from the random source before propagation does, and
//! propagation draws two values per cell in ascending index order. That draw
//! order is what makes a seed reproduce the same fire.

mod injection;
mod propagation;
mod resolve;

pub use injection::{inject_source, nudge_source};
pub use propagation::propagate;
pub use resolve::resolve_colors;

use crate::grid::GridShape;
use crate::palette::PaletteColor;
use crate::params::FireParams;
use crate::random::FireRng;

/// Run one full tick.
///
/// Parameters are not validated here: out-of-range strengths and spans are
/// absorbed by the phases (injection caps at 36, decay is never negative).
///
/// # Panics
///
/// Panics if the buffers do not satisfy [`GridShape::validate`].
pub fn run_tick(
    shape: &GridShape,
    params: &FireParams,
    rng: &mut FireRng,
    palette: &[PaletteColor],
    intensity: &mut [i32],
    colors: &mut [f32],
) {
    inject_source(shape, params.injection_strength, rng, intensity);
    propagate(shape, params, rng, intensity);
    resolve_colors(shape, palette, intensity, colors);
}
